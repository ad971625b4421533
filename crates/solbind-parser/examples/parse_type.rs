use solbind_parser::parse_type;

fn main() {
    let inputs: Vec<String> = std::env::args().skip(1).collect();
    if inputs.is_empty() {
        eprintln!("usage: parse_type <type> [<type> ...]");
        std::process::exit(1);
    }

    for input in &inputs {
        match parse_type(input) {
            Ok(syntax) => println!(
                "{:<24} base={} dimensions={:?}",
                input, syntax.base, syntax.dimensions
            ),
            Err(e) => println!("{:<24} error: {}", input, e),
        }
    }
}
