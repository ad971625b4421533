use super::type_resolver::parse_syntax;
use solbind_core::{Parameter, Result};
use tiny_keccak::{Hasher, Keccak};

/// Canonical type of a parameter as used in signatures: tuples expand to `(a,b)` followed by
/// their array suffix, and integer aliases take their explicit width.
pub fn canonical_type(param: &Parameter, origin: &str) -> Result<String> {
    let syntax = parse_syntax(param, origin)?;
    if !syntax.is_tuple() {
        return Ok(syntax.to_string());
    }

    let components = param
        .components
        .iter()
        .map(|component| canonical_type(component, origin))
        .collect::<Result<Vec<_>>>()?;
    Ok(format!("({}){}", components.join(","), syntax.array_suffix()))
}

pub fn signature(name: &str, params: &[Parameter], origin: &str) -> Result<String> {
    let types = params
        .iter()
        .map(|param| canonical_type(param, origin))
        .collect::<Result<Vec<_>>>()?;
    Ok(format!("{}({})", name, types.join(",")))
}

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut keccak = Keccak::v256();
    let mut output = [0u8; 32];
    keccak.update(data);
    keccak.finalize(&mut output);
    output
}

/// First four bytes of the signature hash.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

pub fn event_topic(signature: &str) -> [u8; 32] {
    keccak256(signature.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    #[test]
    fn test_well_known_selectors() {
        assert_eq!(hex(&selector("transfer(address,uint256)")), "a9059cbb");
        assert_eq!(hex(&selector("balanceOf(address)")), "70a08231");
        assert_eq!(hex(&selector("approve(address,uint256)")), "095ea7b3");
    }

    #[test]
    fn test_transfer_event_topic() {
        assert_eq!(
            hex(&event_topic("Transfer(address,address,uint256)")),
            "ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
        );
    }

    #[test]
    fn test_signature_uses_canonical_widths() {
        let params = vec![Parameter::new("to", "address"), Parameter::new("value", "uint")];
        assert_eq!(
            signature("transfer", &params, "function `transfer`").unwrap(),
            "transfer(address,uint256)"
        );
    }

    #[test]
    fn test_signature_expands_tuples() {
        let point = Parameter::tuple(
            "points",
            "tuple[2][]",
            vec![
                Parameter::new("x", "int"),
                Parameter::tuple("meta", "tuple", vec![Parameter::new("tag", "bytes32")]),
            ],
        );
        assert_eq!(
            signature("draw", &[point, Parameter::new("label", "string")], "function `draw`")
                .unwrap(),
            "draw((int256,(bytes32))[2][],string)"
        );
    }

    #[test]
    fn test_empty_signature() {
        assert_eq!(signature("get", &[], "function `get`").unwrap(), "get()");
    }
}
