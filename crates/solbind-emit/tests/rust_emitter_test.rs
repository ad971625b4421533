use pretty_assertions::assert_eq;
use solbind_core::{
    BindingParam, CompilationUnit, DeployHelper, Elementary, ErrorBinding, EventBinding,
    EventField, FieldSource, FunctionBinding, ModulePath, NativeInt, RepresentationMode,
    ResolvedType, RustType, StructDefinition, StructField, StructId, WireKind,
};
use solbind_emit::{Emitter, EmitterConfig, IndentStyle, RustEmitter, GENERATOR_VERSION};

fn elementary(elementary: Elementary, target: RustType) -> ResolvedType {
    let is_dynamic = elementary.is_dynamic();
    ResolvedType::new(WireKind::Elementary(elementary), target, is_dynamic)
}

fn string() -> ResolvedType {
    elementary(Elementary::String, RustType::String)
}

fn uint256() -> ResolvedType {
    elementary(Elementary::Uint(256), RustType::WideUint)
}

fn address() -> ResolvedType {
    elementary(Elementary::Address, RustType::Address)
}

fn point() -> ResolvedType {
    ResolvedType::new(WireKind::Tuple(StructId(0)), RustType::Struct(StructId(0)), false)
}

fn function(abi_name: &str, signature: &str, selector: [u8; 4]) -> FunctionBinding {
    FunctionBinding {
        abi_name: abi_name.to_string(),
        signature: signature.to_string(),
        selector,
        encoder: String::new(),
        inputs: Vec::new(),
        outputs: Vec::new(),
        value_param: None,
        call: None,
        transaction: None,
    }
}

fn unit(name: &str) -> CompilationUnit {
    CompilationUnit {
        contract_name: name.to_string(),
        type_name: name.to_string(),
        file_stem: name.to_lowercase(),
        module: ModulePath::parse("demo.greeter").unwrap(),
        representation: RepresentationMode::Precise,
        structs: Vec::new(),
        functions: Vec::new(),
        events: Vec::new(),
        errors: Vec::new(),
        deploy: None,
        has_fallback: false,
        has_receive: false,
        public_encoders: false,
    }
}

fn greeter() -> CompilationUnit {
    let mut unit = unit("Greeter");

    let mut greet = function("greet", "greet()", [0xcf, 0xae, 0x32, 0x17]);
    greet.encoder = "encode_greet".to_string();
    greet.outputs = vec![BindingParam::new("value0", string())];
    greet.call = Some("greet".to_string());

    let mut set = function("setGreeting", "setGreeting(string)", [0xa4, 0x13, 0x68, 0x62]);
    set.encoder = "encode_set_greeting".to_string();
    set.inputs = vec![BindingParam::new("greeting", string())];
    set.transaction = Some("set_greeting".to_string());

    unit.functions = vec![greet, set];
    unit.deploy = Some(DeployHelper {
        bytecode: "0x6080".to_string(),
        signature: Some("constructor(string)".to_string()),
        inputs: vec![BindingParam::new("greeting", string())],
        provider_param: "provider".to_string(),
        value_param: None,
    });
    unit
}

const GREETER: &str = r#"//! Bindings for the `Greeter` contract.
//!
//! Generated by solbind {version} into `demo::greeter`. Do not edit by hand.

#![allow(clippy::all)]
#![allow(dead_code, unused_imports, unused_mut)]

use solbind_runtime as rt;
use solbind_runtime::ethabi::{self, ParamType, Token};
use solbind_runtime::Tokenize;

/// Creation bytecode of the contract.
pub const BYTECODE: &str = "0x6080";

/// Typed handle to a deployed `Greeter` contract.
#[derive(Debug, Clone)]
pub struct Greeter<P> {
    inner: rt::Contract<P>,
}

impl<P: rt::Provider> Greeter<P> {
    /// Binds to the contract deployed at `address`.
    pub fn at(address: ethabi::Address, provider: P) -> Self {
        Self {
            inner: rt::Contract::new(address, provider),
        }
    }

    pub fn address(&self) -> ethabi::Address {
        self.inner.address()
    }

    /// Deploys a new instance through `constructor(string)`.
    pub fn deploy(provider: P, greeting: String) -> rt::RemoteDeployment<P, Self> {
        rt::RemoteDeployment::new(provider, BYTECODE, ethabi::encode(&[greeting.into_token()]), None, Self::at)
    }

    /// Calls `greet()` (selector `0xcfae3217`) without sending a transaction.
    pub fn greet(&self) -> rt::RemoteCall<String> {
        self.inner.call(self::encode_greet(), |output| {
            let [token0] = rt::decode_output::<1>(&[ParamType::String], output)?;
            <String as Tokenize>::from_token(token0)
        })
    }

    /// Sends a transaction calling `setGreeting(string)` (selector `0xa4136862`).
    pub fn set_greeting(&self, greeting: String) -> rt::RemoteTransaction {
        self.inner.send(self::encode_set_greeting(greeting), None)
    }
}

/// Calldata for `greet()`.
fn encode_greet() -> Vec<u8> {
    rt::encode_call([0xcf, 0xae, 0x32, 0x17], &[])
}

/// Calldata for `setGreeting(string)`.
fn encode_set_greeting(greeting: String) -> Vec<u8> {
    rt::encode_call([0xa4, 0x13, 0x68, 0x62], &[greeting.into_token()])
}
"#;

#[test]
fn test_greeter_golden() {
    let source = RustEmitter::default().emit_to_string(&greeter()).unwrap();
    assert_eq!(source, GREETER.replace("{version}", GENERATOR_VERSION));
}

#[test]
fn test_emission_is_deterministic() {
    let emitter = RustEmitter::default();
    let unit = greeter();
    assert_eq!(
        emitter.emit_to_string(&unit).unwrap(),
        emitter.emit_to_string(&unit).unwrap()
    );
}

#[test]
fn test_without_bytecode_there_is_no_deploy() {
    let mut unit = greeter();
    unit.deploy = None;
    let source = RustEmitter::default().emit_to_string(&unit).unwrap();

    assert!(!source.contains("BYTECODE"));
    assert!(!source.contains("pub fn deploy"));
}

#[test]
fn test_runtime_crate_and_indent_are_configurable() {
    let config = EmitterConfig {
        indent_style: IndentStyle::Tabs,
        ..EmitterConfig::default()
    }
    .with_runtime_crate("crate::runtime");
    let source = RustEmitter::new(config).emit_to_string(&greeter()).unwrap();

    assert!(source.contains("use crate::runtime as rt;\n"));
    assert!(source.contains("use crate::runtime::ethabi::{self, ParamType, Token};\n"));
    assert!(source.contains("\n\tpub fn address(&self) -> ethabi::Address {\n\t\tself.inner.address()\n\t}\n"));
}

fn point_struct() -> StructDefinition {
    StructDefinition {
        id: StructId(0),
        name: "Point".to_string(),
        fields: vec![
            StructField {
                name: "x".to_string(),
                abi_name: "x".to_string(),
                ty: uint256(),
            },
            StructField {
                name: "y".to_string(),
                abi_name: "y".to_string(),
                ty: uint256(),
            },
        ],
        is_dynamic: false,
    }
}

#[test]
fn test_tuple_struct_implements_tokenize() {
    let mut unit = unit("Shapes");
    unit.structs = vec![point_struct()];
    let source = RustEmitter::default().emit_to_string(&unit).unwrap();

    let expected = r#"#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Point {
    pub x: ethabi::Uint,
    pub y: ethabi::Uint,
}

impl Tokenize for Point {
    fn param_type() -> ParamType {
        ParamType::Tuple(vec![
            ParamType::Uint(256),
            ParamType::Uint(256),
        ])
    }

    fn into_token(self) -> Token {
        Token::Tuple(vec![
            self.x.into_token(),
            self.y.into_token(),
        ])
    }

    fn from_token(token: Token) -> Result<Self, rt::Error> {
        let [token0, token1] = rt::unpack_tuple::<2>(token)?;
        Ok(Self {
            x: <ethabi::Uint as Tokenize>::from_token(token0)?,
            y: <ethabi::Uint as Tokenize>::from_token(token1)?,
        })
    }
}
"#;
    assert!(source.contains(expected), "{}", source);
}

#[test]
fn test_empty_tuple_struct() {
    let mut unit = unit("Shapes");
    unit.structs = vec![StructDefinition {
        id: StructId(0),
        name: "Nothing".to_string(),
        fields: Vec::new(),
        is_dynamic: false,
    }];
    let source = RustEmitter::default().emit_to_string(&unit).unwrap();

    assert!(source.contains("pub struct Nothing {}\n"));
    assert!(source.contains("ParamType::Tuple(vec![])"));
    assert!(source.contains("Token::Tuple(vec![])"));
    assert!(source.contains("        rt::unpack_tuple::<0>(token)?;\n        Ok(Self {})\n"));
}

fn moved_event(anonymous: bool) -> EventBinding {
    let first_topic = if anonymous { 0 } else { 1 };
    EventBinding {
        abi_name: "Moved".to_string(),
        signature: "Moved(address,string,(uint256,uint256))".to_string(),
        topic: [0xab; 32],
        anonymous,
        record_name: "MovedEvent".to_string(),
        filter_method: "moved_events".to_string(),
        fields: vec![
            EventField {
                name: "who".to_string(),
                ty: address(),
                source: FieldSource::Topic(first_topic),
            },
            EventField {
                name: "tag".to_string(),
                ty: ResolvedType::topic_hash(),
                source: FieldSource::Topic(first_topic + 1),
            },
            EventField {
                name: "to".to_string(),
                ty: point(),
                source: FieldSource::Data(0),
            },
        ],
    }
}

#[test]
fn test_event_record_decodes_topics_and_data() {
    let mut unit = unit("Board");
    unit.structs = vec![point_struct()];
    unit.events = vec![moved_event(false)];
    let source = RustEmitter::default().emit_to_string(&unit).unwrap();

    let expected = r#"/// Decoded `Moved(address,string,(uint256,uint256))` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovedEvent {
    pub who: ethabi::Address,
    pub tag: ethabi::Hash,
    pub to: Point,
}

impl MovedEvent {
    pub const SIGNATURE: &'static str = "Moved(address,string,(uint256,uint256))";
    pub const TOPIC: [u8; 32] = [
        0xab, 0xab, 0xab, 0xab, 0xab, 0xab, 0xab, 0xab,
        0xab, 0xab, 0xab, 0xab, 0xab, 0xab, 0xab, 0xab,
        0xab, 0xab, 0xab, 0xab, 0xab, 0xab, 0xab, 0xab,
        0xab, 0xab, 0xab, 0xab, 0xab, 0xab, 0xab, 0xab,
    ];

    pub fn decode_log(log: &ethabi::RawLog) -> Result<Self, rt::Error> {
        rt::check_topics(log, 3, Some(&Self::TOPIC))?;
        let [data0] = rt::decode_output::<1>(&[Point::param_type()], &log.data)?;
        Ok(Self {
            who: <ethabi::Address as Tokenize>::from_token(rt::decode_topic(&log.topics[1], &ParamType::Address)?)?,
            tag: log.topics[2],
            to: <Point as Tokenize>::from_token(data0)?,
        })
    }
}
"#;
    assert!(source.contains(expected), "{}", source);
    assert!(source.contains(
        "    /// Filter over `Moved` logs.\n    pub fn moved_events(&self) -> rt::EventFilter<MovedEvent> {\n        self.inner.event_filter(Some(MovedEvent::TOPIC), MovedEvent::decode_log)\n    }\n"
    ));
}

#[test]
fn test_anonymous_event_has_no_topic_constant() {
    let mut unit = unit("Board");
    unit.structs = vec![point_struct()];
    unit.events = vec![moved_event(true)];
    let source = RustEmitter::default().emit_to_string(&unit).unwrap();

    assert!(source.contains("/// Decoded `Moved(address,string,(uint256,uint256))` anonymous event."));
    assert!(!source.contains("pub const TOPIC"));
    assert!(source.contains("rt::check_topics(log, 2, None)?;"));
    assert!(source.contains("&log.topics[0], &ParamType::Address"));
    assert!(source.contains("tag: log.topics[1],"));
    assert!(source.contains("self.inner.event_filter(None, MovedEvent::decode_log)"));
}

#[test]
fn test_error_record() {
    let mut unit = unit("Vault");
    unit.errors = vec![
        ErrorBinding {
            abi_name: "Stuck".to_string(),
            signature: "Stuck(uint8)".to_string(),
            selector: [0x01, 0x02, 0x03, 0x04],
            record_name: "StuckError".to_string(),
            fields: vec![BindingParam::new(
                "code",
                elementary(Elementary::Uint(8), RustType::Native(NativeInt::U8)),
            )],
        },
        ErrorBinding {
            abi_name: "Paused".to_string(),
            signature: "Paused()".to_string(),
            selector: [0xaa, 0xbb, 0xcc, 0xdd],
            record_name: "PausedError".to_string(),
            fields: Vec::new(),
        },
    ];
    let source = RustEmitter::default().emit_to_string(&unit).unwrap();

    let expected = r#"impl StuckError {
    pub const SIGNATURE: &'static str = "Stuck(uint8)";
    pub const SELECTOR: [u8; 4] = [0x01, 0x02, 0x03, 0x04];

    /// Decodes revert data carrying this error.
    pub fn decode(data: &[u8]) -> Result<Self, rt::Error> {
        let [data0] = rt::decode_error::<1>(Self::SELECTOR, &[ParamType::Uint(8)], data)?;
        Ok(Self {
            code: <u8 as Tokenize>::from_token(data0)?,
        })
    }
}
"#;
    assert!(source.contains(expected), "{}", source);
    assert!(source.contains("pub struct PausedError {}\n"));
    assert!(source.contains(
        "        rt::decode_error::<0>(Self::SELECTOR, &[], data)?;\n        Ok(Self {})\n"
    ));
}

#[test]
fn test_payable_and_multi_output_functions() {
    let mut unit = unit("Vault");

    let mut deposit = function("deposit", "deposit()", [0xd0, 0xe3, 0x0d, 0xb0]);
    deposit.encoder = "encode_deposit".to_string();
    deposit.value_param = Some("wei_value".to_string());
    deposit.transaction = Some("deposit".to_string());

    let mut position = function("position", "position()", [0x09, 0x21, 0x8e, 0x91]);
    position.encoder = "encode_position".to_string();
    position.outputs = vec![
        BindingParam::new("value0", uint256()),
        BindingParam::new("owner", address()),
    ];
    position.call = Some("position".to_string());
    position.transaction = Some("send_position".to_string());

    unit.functions = vec![deposit, position];
    unit.public_encoders = true;
    unit.has_receive = true;
    let source = RustEmitter::default().emit_to_string(&unit).unwrap();

    assert!(source.contains(
        "    pub fn deposit(&self, wei_value: ethabi::Uint) -> rt::RemoteTransaction {\n        self.inner.send(self::encode_deposit(), Some(wei_value))\n    }\n"
    ));

    let expected = r#"    pub fn position(&self) -> rt::RemoteCall<(ethabi::Uint, ethabi::Address)> {
        self.inner.call(self::encode_position(), |output| {
            let [token0, token1] = rt::decode_output::<2>(&[ParamType::Uint(256), ParamType::Address], output)?;
            Ok((
                <ethabi::Uint as Tokenize>::from_token(token0)?,
                <ethabi::Address as Tokenize>::from_token(token1)?,
            ))
        })
    }
"#;
    assert!(source.contains(expected), "{}", source);
    assert!(source.contains(
        "    pub fn send_position(&self) -> rt::RemoteTransaction {\n        self.inner.send(self::encode_position(), None)\n    }\n"
    ));
    assert!(source.contains("pub fn encode_deposit() -> Vec<u8> {"));
    assert!(source.contains("pub fn encode_position() -> Vec<u8> {"));
    assert!(source.contains(
        "pub fn raw_transaction(&self, data: Vec<u8>, wei_value: Option<ethabi::Uint>) -> rt::RemoteTransaction {\n        self.inner.send(data, wei_value)\n"
    ));
}

#[test]
fn test_void_call_and_payable_deploy() {
    let mut unit = unit("Vault");
    let mut ping = function("ping", "ping()", [0x5c, 0x36, 0xb1, 0x86]);
    ping.encoder = "encode_ping".to_string();
    ping.call = Some("ping".to_string());
    unit.functions = vec![ping];
    unit.deploy = Some(DeployHelper {
        bytecode: "0x00".to_string(),
        signature: None,
        inputs: Vec::new(),
        provider_param: "provider".to_string(),
        value_param: Some("wei_value".to_string()),
    });
    let source = RustEmitter::default().emit_to_string(&unit).unwrap();

    assert!(source.contains("pub fn ping(&self) -> rt::RemoteCall<()> {\n        self.inner.call(self::encode_ping(), |_output| Ok(()))\n"));
    assert!(source.contains("    /// Deploys a new instance.\n"));
    assert!(source.contains(
        "pub fn deploy(provider: P, wei_value: ethabi::Uint) -> rt::RemoteDeployment<P, Self> {\n        rt::RemoteDeployment::new(provider, BYTECODE, Vec::new(), Some(wei_value), Self::at)\n"
    ));
    assert!(!source.contains("raw_transaction"));
}
