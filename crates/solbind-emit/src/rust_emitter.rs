use crate::config::EmitterConfig;
use crate::emitter::{EmitContext, EmitHelper, EmitResult, Emitter};
use solbind_core::{
    BindingParam, CompilationUnit, DeployHelper, Elementary, ErrorBinding, EventBinding,
    EventField, FieldSource, FunctionBinding, RustType, StructDefinition, StructId, WireKind,
};
use std::io::Write;

pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

fn format_bytes(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn byte_literals(bytes: &[u8]) -> Vec<String> {
    bytes.iter().map(|b| format!("0x{:02x}", b)).collect()
}

/// Renders a [`CompilationUnit`] as one Rust source file.
#[derive(Debug, Clone, Default)]
pub struct RustEmitter {
    config: EmitterConfig,
}

impl RustEmitter {
    pub fn new(config: EmitterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }
}

impl Emitter for RustEmitter {
    type Item = CompilationUnit;

    fn emit<W: Write>(
        &self,
        unit: &CompilationUnit,
        writer: &mut W,
        context: &mut EmitContext,
    ) -> EmitResult {
        let renderer = UnitRenderer {
            unit,
            runtime: &self.config.runtime_crate,
        };
        renderer.render(writer, context)
    }

    fn context(&self) -> EmitContext {
        EmitContext::from_config(&self.config)
    }
}

struct UnitRenderer<'u> {
    unit: &'u CompilationUnit,
    runtime: &'u str,
}

impl UnitRenderer<'_> {
    fn render<W: Write>(&self, w: &mut W, ctx: &mut EmitContext) -> EmitResult {
        self.header(w, ctx)?;

        if let Some(deploy) = &self.unit.deploy {
            EmitHelper::blank_line(w)?;
            EmitHelper::write_doc(w, ctx, "Creation bytecode of the contract.")?;
            EmitHelper::write_line(
                w,
                ctx,
                &format!("pub const BYTECODE: &str = {:?};", deploy.bytecode),
            )?;
        }

        for def in &self.unit.structs {
            EmitHelper::blank_line(w)?;
            self.tuple_struct(w, ctx, def)?;
        }
        for event in &self.unit.events {
            EmitHelper::blank_line(w)?;
            self.event_record(w, ctx, event)?;
        }
        for error in &self.unit.errors {
            EmitHelper::blank_line(w)?;
            self.error_record(w, ctx, error)?;
        }

        EmitHelper::blank_line(w)?;
        self.contract(w, ctx)?;

        for function in &self.unit.functions {
            EmitHelper::blank_line(w)?;
            self.encoder(w, ctx, function)?;
        }
        Ok(())
    }

    fn header<W: Write>(&self, w: &mut W, ctx: &mut EmitContext) -> EmitResult {
        let lines = [
            format!("//! Bindings for the `{}` contract.", self.unit.contract_name),
            "//!".to_string(),
            format!(
                "//! Generated by solbind {} into `{}`. Do not edit by hand.",
                GENERATOR_VERSION, self.unit.module
            ),
            String::new(),
            "#![allow(clippy::all)]".to_string(),
            "#![allow(dead_code, unused_imports, unused_mut)]".to_string(),
            String::new(),
            format!("use {} as rt;", self.runtime),
            format!("use {}::ethabi::{{self, ParamType, Token}};", self.runtime),
            format!("use {}::Tokenize;", self.runtime),
        ];
        for line in &lines {
            EmitHelper::write_line(w, ctx, line)?;
        }
        Ok(())
    }

    fn struct_name(&self, id: StructId) -> String {
        self.unit
            .struct_def(id)
            .map(|def| def.name.clone())
            .unwrap_or_else(|| format!("Struct{}", id.0))
    }

    fn rust_type(&self, ty: &RustType) -> String {
        match ty {
            RustType::Bool => "bool".to_string(),
            RustType::Address => "ethabi::Address".to_string(),
            RustType::Native(native) => native.as_str().to_string(),
            RustType::WideUint => "ethabi::Uint".to_string(),
            RustType::WideInt => "ethabi::Int".to_string(),
            RustType::FixedBytes(n) => format!("[u8; {}]", n),
            RustType::Bytes => "Vec<u8>".to_string(),
            RustType::String => "String".to_string(),
            RustType::Hash => "ethabi::Hash".to_string(),
            RustType::Vec(inner) => format!("Vec<{}>", self.rust_type(inner)),
            RustType::Array(inner, n) => format!("[{}; {}]", self.rust_type(inner), n),
            RustType::Struct(id) => self.struct_name(*id),
        }
    }

    fn param_type(&self, wire: &WireKind) -> String {
        match wire {
            WireKind::Elementary(elementary) => match elementary {
                Elementary::Uint(bits) => format!("ParamType::Uint({})", bits),
                Elementary::Int(bits) => format!("ParamType::Int({})", bits),
                Elementary::Address => "ParamType::Address".to_string(),
                Elementary::Bool => "ParamType::Bool".to_string(),
                Elementary::FixedBytes(n) => format!("ParamType::FixedBytes({})", n),
                Elementary::Bytes => "ParamType::Bytes".to_string(),
                Elementary::String => "ParamType::String".to_string(),
            },
            WireKind::Array(inner, None) => {
                format!("ParamType::Array(Box::new({}))", self.param_type(inner))
            }
            WireKind::Array(inner, Some(len)) => format!(
                "ParamType::FixedArray(Box::new({}), {})",
                self.param_type(inner),
                len
            ),
            WireKind::Tuple(id) => format!("{}::param_type()", self.struct_name(*id)),
        }
    }

    fn param_types<'a>(&self, wires: impl Iterator<Item = &'a WireKind>) -> String {
        let types: Vec<String> = wires.map(|wire| self.param_type(wire)).collect();
        format!("&[{}]", types.join(", "))
    }

    /// Expression converting `value` into a `Token`.
    fn into_token(&self, value: &str, wire: &WireKind, target: &RustType, depth: usize) -> String {
        match (wire, target) {
            (_, RustType::Hash) => format!("Token::FixedBytes({}.as_bytes().to_vec())", value),
            (WireKind::Elementary(Elementary::Bytes), _) => format!("Token::Bytes({})", value),
            (WireKind::Elementary(Elementary::FixedBytes(_)), _) => {
                format!("Token::FixedBytes({}.to_vec())", value)
            }
            (WireKind::Elementary(Elementary::Int(_)), RustType::WideInt) => {
                format!("Token::Int({})", value)
            }
            (WireKind::Array(inner_wire, len), RustType::Vec(inner) | RustType::Array(inner, _)) => {
                let item = format!("item{}", depth);
                let variant = if len.is_some() { "FixedArray" } else { "Array" };
                format!(
                    "Token::{}({}.into_iter().map(|{}| {}).collect())",
                    variant,
                    value,
                    item,
                    self.into_token(&item, inner_wire, inner, depth + 1)
                )
            }
            _ => format!("{}.into_token()", value),
        }
    }

    /// Expression converting the token `value` into a `Result` of the target type.
    fn from_token(&self, value: &str, wire: &WireKind, target: &RustType, depth: usize) -> String {
        match (wire, target) {
            (_, RustType::Hash) => format!("<ethabi::Hash as Tokenize>::from_token({})", value),
            (WireKind::Elementary(Elementary::Bytes), _) => {
                format!("rt::bytes_from_token({})", value)
            }
            (WireKind::Elementary(Elementary::FixedBytes(n)), _) => {
                format!("rt::fixed_bytes_from_token::<{}>({})", n, value)
            }
            (WireKind::Elementary(Elementary::Int(_)), RustType::WideInt) => {
                format!("rt::int_from_token({})", value)
            }
            (WireKind::Array(inner_wire, None), RustType::Vec(inner)) => {
                let item = format!("item{}", depth);
                format!(
                    "rt::array_from_token({}, |{}| {})",
                    value,
                    item,
                    self.from_token(&item, inner_wire, inner, depth + 1)
                )
            }
            (WireKind::Array(inner_wire, Some(len)), RustType::Array(inner, _)) => {
                let item = format!("item{}", depth);
                format!(
                    "rt::fixed_array_from_token::<_, {}>({}, |{}| {})",
                    len,
                    value,
                    item,
                    self.from_token(&item, inner_wire, inner, depth + 1)
                )
            }
            _ => format!(
                "<{} as Tokenize>::from_token({})",
                self.rust_type(target),
                value
            ),
        }
    }

    fn param_list(&self, params: &[BindingParam]) -> Vec<String> {
        params
            .iter()
            .map(|p| format!("{}: {}", p.name, self.rust_type(&p.ty.target)))
            .collect()
    }

    fn param_tokens(&self, params: &[BindingParam]) -> String {
        let tokens: Vec<String> = params
            .iter()
            .map(|p| self.into_token(&p.name, &p.ty.wire, &p.ty.target, 0))
            .collect();
        format!("&[{}]", tokens.join(", "))
    }

    fn record_struct<W: Write>(
        &self,
        w: &mut W,
        ctx: &mut EmitContext,
        name: &str,
        fields: &[(String, String)],
    ) -> EmitResult {
        EmitHelper::write_line(w, ctx, "#[derive(Debug, Clone, PartialEq, Eq)]")?;
        if fields.is_empty() {
            return EmitHelper::write_line(w, ctx, &format!("pub struct {} {{}}", name));
        }
        EmitHelper::write_block(w, ctx, &format!("pub struct {}", name), |w, ctx| {
            for (field, ty) in fields {
                EmitHelper::write_line(w, ctx, &format!("pub {}: {},", field, ty))?;
            }
            Ok(())
        })
    }

    /// Writes `Ok(Self { .. })` from `(field, fallible expression)` pairs.
    fn self_literal<W: Write>(
        &self,
        w: &mut W,
        ctx: &mut EmitContext,
        fields: &[(String, String)],
    ) -> EmitResult {
        if fields.is_empty() {
            return EmitHelper::write_line(w, ctx, "Ok(Self {})");
        }
        EmitHelper::write_block_with_close(w, ctx, "Ok(Self", "})", |w, ctx| {
            for (field, expr) in fields {
                EmitHelper::write_line(w, ctx, &format!("{}: {}?,", field, expr))?;
            }
            Ok(())
        })
    }

    fn write_list<W: Write>(
        &self,
        w: &mut W,
        ctx: &mut EmitContext,
        open: &str,
        items: &[String],
        close: &str,
    ) -> EmitResult {
        if items.is_empty() {
            return EmitHelper::write_line(w, ctx, &format!("{}{}", open, close));
        }
        EmitHelper::write_line(w, ctx, open)?;
        ctx.indent();
        for item in items {
            EmitHelper::write_line(w, ctx, &format!("{},", item))?;
        }
        ctx.dedent();
        EmitHelper::write_line(w, ctx, close)
    }

    fn tuple_struct<W: Write>(
        &self,
        w: &mut W,
        ctx: &mut EmitContext,
        def: &StructDefinition,
    ) -> EmitResult {
        let fields: Vec<(String, String)> = def
            .fields
            .iter()
            .map(|f| (f.name.clone(), self.rust_type(&f.ty.target)))
            .collect();
        self.record_struct(w, ctx, &def.name, &fields)?;
        EmitHelper::blank_line(w)?;

        EmitHelper::write_block(w, ctx, &format!("impl Tokenize for {}", def.name), |w, ctx| {
            let param_types: Vec<String> = def
                .fields
                .iter()
                .map(|f| self.param_type(&f.ty.wire))
                .collect();
            EmitHelper::write_block(w, ctx, "fn param_type() -> ParamType", |w, ctx| {
                self.write_list(w, ctx, "ParamType::Tuple(vec![", &param_types, "])")
            })?;
            EmitHelper::blank_line(w)?;

            let tokens: Vec<String> = def
                .fields
                .iter()
                .map(|f| {
                    self.into_token(&format!("self.{}", f.name), &f.ty.wire, &f.ty.target, 0)
                })
                .collect();
            EmitHelper::write_block(w, ctx, "fn into_token(self) -> Token", |w, ctx| {
                self.write_list(w, ctx, "Token::Tuple(vec![", &tokens, "])")
            })?;
            EmitHelper::blank_line(w)?;

            EmitHelper::write_block(
                w,
                ctx,
                "fn from_token(token: Token) -> Result<Self, rt::Error>",
                |w, ctx| {
                    let locals: Vec<String> =
                        (0..def.fields.len()).map(|i| format!("token{}", i)).collect();
                    let unpack = format!("rt::unpack_tuple::<{}>(token)?;", locals.len());
                    if locals.is_empty() {
                        EmitHelper::write_line(w, ctx, &unpack)?;
                    } else {
                        EmitHelper::write_line(
                            w,
                            ctx,
                            &format!("let [{}] = {}", locals.join(", "), unpack),
                        )?;
                    }
                    let values: Vec<(String, String)> = def
                        .fields
                        .iter()
                        .zip(&locals)
                        .map(|(f, local)| {
                            (
                                f.name.clone(),
                                self.from_token(local, &f.ty.wire, &f.ty.target, 0),
                            )
                        })
                        .collect();
                    self.self_literal(w, ctx, &values)
                },
            )
        })
    }

    fn write_hash_const<W: Write>(
        &self,
        w: &mut W,
        ctx: &mut EmitContext,
        header: &str,
        bytes: &[u8],
    ) -> EmitResult {
        let literals = byte_literals(bytes);
        if literals.len() <= 8 {
            return EmitHelper::write_line(w, ctx, &format!("{}[{}];", header, literals.join(", ")));
        }
        EmitHelper::write_line(w, ctx, &format!("{}[", header))?;
        ctx.indent();
        for row in literals.chunks(8) {
            EmitHelper::write_line(w, ctx, &format!("{},", row.join(", ")))?;
        }
        ctx.dedent();
        EmitHelper::write_line(w, ctx, "];")
    }

    fn event_record<W: Write>(
        &self,
        w: &mut W,
        ctx: &mut EmitContext,
        event: &EventBinding,
    ) -> EmitResult {
        let kind = if event.anonymous { "anonymous event" } else { "event" };
        EmitHelper::write_doc(w, ctx, &format!("Decoded `{}` {}.", event.signature, kind))?;
        let fields: Vec<(String, String)> = event
            .fields
            .iter()
            .map(|f| (f.name.clone(), self.rust_type(&f.ty.target)))
            .collect();
        self.record_struct(w, ctx, &event.record_name, &fields)?;
        EmitHelper::blank_line(w)?;

        EmitHelper::write_block(w, ctx, &format!("impl {}", event.record_name), |w, ctx| {
            EmitHelper::write_line(
                w,
                ctx,
                &format!("pub const SIGNATURE: &'static str = {:?};", event.signature),
            )?;
            if !event.anonymous {
                self.write_hash_const(w, ctx, "pub const TOPIC: [u8; 32] = ", &event.topic)?;
            }
            EmitHelper::blank_line(w)?;

            EmitHelper::write_block(
                w,
                ctx,
                "pub fn decode_log(log: &ethabi::RawLog) -> Result<Self, rt::Error>",
                |w, ctx| self.decode_log_body(w, ctx, event),
            )
        })
    }

    fn decode_log_body<W: Write>(
        &self,
        w: &mut W,
        ctx: &mut EmitContext,
        event: &EventBinding,
    ) -> EmitResult {
        let expected = if event.anonymous {
            "None"
        } else {
            "Some(&Self::TOPIC)"
        };
        EmitHelper::write_line(
            w,
            ctx,
            &format!(
                "rt::check_topics(log, {}, {})?;",
                event.topic_count(),
                expected
            ),
        )?;

        let data: Vec<&EventField> = event.data_fields().collect();
        if !data.is_empty() {
            let locals: Vec<String> = (0..data.len()).map(|i| format!("data{}", i)).collect();
            EmitHelper::write_line(
                w,
                ctx,
                &format!(
                    "let [{}] = rt::decode_output::<{}>({}, &log.data)?;",
                    locals.join(", "),
                    data.len(),
                    self.param_types(data.iter().map(|f| &f.ty.wire))
                ),
            )?;
        }

        if event.fields.is_empty() {
            return EmitHelper::write_line(w, ctx, "Ok(Self {})");
        }
        EmitHelper::write_block_with_close(w, ctx, "Ok(Self", "})", |w, ctx| {
            for field in &event.fields {
                let expr = match field.source {
                    FieldSource::Topic(index) if field.ty.target == RustType::Hash => {
                        format!("log.topics[{}]", index)
                    }
                    FieldSource::Topic(index) => {
                        let token = format!(
                            "rt::decode_topic(&log.topics[{}], &{})?",
                            index,
                            self.param_type(&field.ty.wire)
                        );
                        format!(
                            "{}?",
                            self.from_token(&token, &field.ty.wire, &field.ty.target, 0)
                        )
                    }
                    FieldSource::Data(index) => format!(
                        "{}?",
                        self.from_token(
                            &format!("data{}", index),
                            &field.ty.wire,
                            &field.ty.target,
                            0
                        )
                    ),
                };
                EmitHelper::write_line(w, ctx, &format!("{}: {},", field.name, expr))?;
            }
            Ok(())
        })
    }

    fn error_record<W: Write>(
        &self,
        w: &mut W,
        ctx: &mut EmitContext,
        error: &ErrorBinding,
    ) -> EmitResult {
        EmitHelper::write_doc(w, ctx, &format!("Decoded `{}` custom error.", error.signature))?;
        let fields: Vec<(String, String)> = error
            .fields
            .iter()
            .map(|f| (f.name.clone(), self.rust_type(&f.ty.target)))
            .collect();
        self.record_struct(w, ctx, &error.record_name, &fields)?;
        EmitHelper::blank_line(w)?;

        EmitHelper::write_block(w, ctx, &format!("impl {}", error.record_name), |w, ctx| {
            EmitHelper::write_line(
                w,
                ctx,
                &format!("pub const SIGNATURE: &'static str = {:?};", error.signature),
            )?;
            self.write_hash_const(w, ctx, "pub const SELECTOR: [u8; 4] = ", &error.selector)?;
            EmitHelper::blank_line(w)?;

            EmitHelper::write_doc(w, ctx, "Decodes revert data carrying this error.")?;
            EmitHelper::write_block(
                w,
                ctx,
                "pub fn decode(data: &[u8]) -> Result<Self, rt::Error>",
                |w, ctx| {
                    let locals: Vec<String> =
                        (0..error.fields.len()).map(|i| format!("data{}", i)).collect();
                    let decode = format!(
                        "rt::decode_error::<{}>(Self::SELECTOR, {}, data)?;",
                        locals.len(),
                        self.param_types(error.fields.iter().map(|f| &f.ty.wire))
                    );
                    if locals.is_empty() {
                        EmitHelper::write_line(w, ctx, &decode)?;
                    } else {
                        EmitHelper::write_line(
                            w,
                            ctx,
                            &format!("let [{}] = {}", locals.join(", "), decode),
                        )?;
                    }
                    let values: Vec<(String, String)> = error
                        .fields
                        .iter()
                        .zip(&locals)
                        .map(|(f, local)| {
                            (
                                f.name.clone(),
                                self.from_token(local, &f.ty.wire, &f.ty.target, 0),
                            )
                        })
                        .collect();
                    self.self_literal(w, ctx, &values)
                },
            )
        })
    }

    fn contract<W: Write>(&self, w: &mut W, ctx: &mut EmitContext) -> EmitResult {
        let name = &self.unit.type_name;
        EmitHelper::write_doc(
            w,
            ctx,
            &format!("Typed handle to a deployed `{}` contract.", self.unit.contract_name),
        )?;
        EmitHelper::write_line(w, ctx, "#[derive(Debug, Clone)]")?;
        EmitHelper::write_block(w, ctx, &format!("pub struct {}<P>", name), |w, ctx| {
            EmitHelper::write_line(w, ctx, "inner: rt::Contract<P>,")
        })?;
        EmitHelper::blank_line(w)?;

        EmitHelper::write_block(w, ctx, &format!("impl<P: rt::Provider> {}<P>", name), |w, ctx| {
            EmitHelper::write_doc(w, ctx, "Binds to the contract deployed at `address`.")?;
            EmitHelper::write_block(
                w,
                ctx,
                "pub fn at(address: ethabi::Address, provider: P) -> Self",
                |w, ctx| {
                    EmitHelper::write_block_with_close(w, ctx, "Self", "}", |w, ctx| {
                        EmitHelper::write_line(
                            w,
                            ctx,
                            "inner: rt::Contract::new(address, provider),",
                        )
                    })
                },
            )?;
            EmitHelper::blank_line(w)?;

            EmitHelper::write_block(w, ctx, "pub fn address(&self) -> ethabi::Address", |w, ctx| {
                EmitHelper::write_line(w, ctx, "self.inner.address()")
            })?;

            if let Some(deploy) = &self.unit.deploy {
                EmitHelper::blank_line(w)?;
                self.deploy_method(w, ctx, deploy)?;
            }

            for function in &self.unit.functions {
                if let Some(method) = &function.call {
                    EmitHelper::blank_line(w)?;
                    self.call_method(w, ctx, function, method)?;
                }
                if let Some(method) = &function.transaction {
                    EmitHelper::blank_line(w)?;
                    self.transaction_method(w, ctx, function, method)?;
                }
            }

            for event in &self.unit.events {
                EmitHelper::blank_line(w)?;
                self.filter_method(w, ctx, event)?;
            }

            if self.unit.has_fallback || self.unit.has_receive {
                EmitHelper::blank_line(w)?;
                EmitHelper::write_doc(
                    w,
                    ctx,
                    "Sends raw calldata, reaching the fallback or receive entry point.",
                )?;
                EmitHelper::write_block(
                    w,
                    ctx,
                    "pub fn raw_transaction(&self, data: Vec<u8>, wei_value: Option<ethabi::Uint>) -> rt::RemoteTransaction",
                    |w, ctx| EmitHelper::write_line(w, ctx, "self.inner.send(data, wei_value)"),
                )?;
            }
            Ok(())
        })
    }

    fn deploy_method<W: Write>(
        &self,
        w: &mut W,
        ctx: &mut EmitContext,
        deploy: &DeployHelper,
    ) -> EmitResult {
        match &deploy.signature {
            Some(signature) => EmitHelper::write_doc(
                w,
                ctx,
                &format!("Deploys a new instance through `{}`.", signature),
            )?,
            None => EmitHelper::write_doc(w, ctx, "Deploys a new instance.")?,
        }

        let mut params = vec![format!("{}: P", deploy.provider_param)];
        params.extend(self.param_list(&deploy.inputs));
        if let Some(value) = &deploy.value_param {
            params.push(format!("{}: ethabi::Uint", value));
        }
        let header = format!(
            "pub fn deploy({}) -> rt::RemoteDeployment<P, Self>",
            params.join(", ")
        );

        let arguments = if deploy.inputs.is_empty() {
            "Vec::new()".to_string()
        } else {
            format!("ethabi::encode({})", self.param_tokens(&deploy.inputs))
        };
        let value = match &deploy.value_param {
            Some(value) => format!("Some({})", value),
            None => "None".to_string(),
        };

        EmitHelper::write_block(w, ctx, &header, |w, ctx| {
            EmitHelper::write_line(
                w,
                ctx,
                &format!(
                    "rt::RemoteDeployment::new({}, BYTECODE, {}, {}, Self::at)",
                    deploy.provider_param, arguments, value
                ),
            )
        })
    }

    fn encoder_call(&self, function: &FunctionBinding) -> String {
        let args: Vec<&str> = function.inputs.iter().map(|p| p.name.as_str()).collect();
        format!("self::{}({})", function.encoder, args.join(", "))
    }

    fn call_method<W: Write>(
        &self,
        w: &mut W,
        ctx: &mut EmitContext,
        function: &FunctionBinding,
        method: &str,
    ) -> EmitResult {
        EmitHelper::write_doc(
            w,
            ctx,
            &format!(
                "Calls `{}` (selector `0x{}`) without sending a transaction.",
                function.signature,
                format_bytes(&function.selector)
            ),
        )?;

        let outputs = &function.outputs;
        let return_type = match outputs.as_slice() {
            [] => "()".to_string(),
            [single] => self.rust_type(&single.ty.target),
            many => {
                let types: Vec<String> =
                    many.iter().map(|p| self.rust_type(&p.ty.target)).collect();
                format!("({})", types.join(", "))
            }
        };

        let mut params = vec!["&self".to_string()];
        params.extend(self.param_list(&function.inputs));
        let header = format!(
            "pub fn {}({}) -> rt::RemoteCall<{}>",
            method,
            params.join(", "),
            return_type
        );

        EmitHelper::write_block(w, ctx, &header, |w, ctx| {
            if outputs.is_empty() {
                return EmitHelper::write_line(
                    w,
                    ctx,
                    &format!(
                        "self.inner.call({}, |_output| Ok(()))",
                        self.encoder_call(function)
                    ),
                );
            }

            let open = format!("self.inner.call({}, |output|", self.encoder_call(function));
            EmitHelper::write_block_with_close(w, ctx, &open, "})", |w, ctx| {
                let locals: Vec<String> =
                    (0..outputs.len()).map(|i| format!("token{}", i)).collect();
                EmitHelper::write_line(
                    w,
                    ctx,
                    &format!(
                        "let [{}] = rt::decode_output::<{}>({}, output)?;",
                        locals.join(", "),
                        outputs.len(),
                        self.param_types(outputs.iter().map(|p| &p.ty.wire))
                    ),
                )?;
                let values: Vec<String> = outputs
                    .iter()
                    .zip(&locals)
                    .map(|(p, local)| self.from_token(local, &p.ty.wire, &p.ty.target, 0))
                    .collect();
                match values.as_slice() {
                    [single] => EmitHelper::write_line(w, ctx, single),
                    many => {
                        let tried: Vec<String> = many.iter().map(|v| format!("{}?", v)).collect();
                        self.write_list(w, ctx, "Ok((", &tried, "))")
                    }
                }
            })
        })
    }

    fn transaction_method<W: Write>(
        &self,
        w: &mut W,
        ctx: &mut EmitContext,
        function: &FunctionBinding,
        method: &str,
    ) -> EmitResult {
        EmitHelper::write_doc(
            w,
            ctx,
            &format!(
                "Sends a transaction calling `{}` (selector `0x{}`).",
                function.signature,
                format_bytes(&function.selector)
            ),
        )?;

        let mut params = vec!["&self".to_string()];
        params.extend(self.param_list(&function.inputs));
        if let Some(value) = &function.value_param {
            params.push(format!("{}: ethabi::Uint", value));
        }
        let header = format!(
            "pub fn {}({}) -> rt::RemoteTransaction",
            method,
            params.join(", ")
        );
        let value = match &function.value_param {
            Some(value) => format!("Some({})", value),
            None => "None".to_string(),
        };

        EmitHelper::write_block(w, ctx, &header, |w, ctx| {
            EmitHelper::write_line(
                w,
                ctx,
                &format!(
                    "self.inner.send({}, {})",
                    self.encoder_call(function),
                    value
                ),
            )
        })
    }

    fn filter_method<W: Write>(
        &self,
        w: &mut W,
        ctx: &mut EmitContext,
        event: &EventBinding,
    ) -> EmitResult {
        EmitHelper::write_doc(w, ctx, &format!("Filter over `{}` logs.", event.abi_name))?;
        let header = format!(
            "pub fn {}(&self) -> rt::EventFilter<{}>",
            event.filter_method, event.record_name
        );
        let topic = if event.anonymous {
            "None".to_string()
        } else {
            format!("Some({}::TOPIC)", event.record_name)
        };
        EmitHelper::write_block(w, ctx, &header, |w, ctx| {
            EmitHelper::write_line(
                w,
                ctx,
                &format!(
                    "self.inner.event_filter({}, {}::decode_log)",
                    topic, event.record_name
                ),
            )
        })
    }

    fn encoder<W: Write>(
        &self,
        w: &mut W,
        ctx: &mut EmitContext,
        function: &FunctionBinding,
    ) -> EmitResult {
        EmitHelper::write_doc(w, ctx, &format!("Calldata for `{}`.", function.signature))?;
        let visibility = if self.unit.public_encoders { "pub " } else { "" };
        let header = format!(
            "{}fn {}({}) -> Vec<u8>",
            visibility,
            function.encoder,
            self.param_list(&function.inputs).join(", ")
        );
        EmitHelper::write_block(w, ctx, &header, |w, ctx| {
            EmitHelper::write_line(
                w,
                ctx,
                &format!(
                    "rt::encode_call([{}], {})",
                    byte_literals(&function.selector).join(", "),
                    self.param_tokens(&function.inputs)
                ),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solbind_core::{ModulePath, NativeInt, RepresentationMode, ResolvedType};

    fn renderer(unit: &CompilationUnit) -> UnitRenderer<'_> {
        UnitRenderer {
            unit,
            runtime: "solbind_runtime",
        }
    }

    fn empty_unit() -> CompilationUnit {
        CompilationUnit {
            contract_name: "Empty".to_string(),
            type_name: "Empty".to_string(),
            file_stem: "empty".to_string(),
            module: ModulePath::parse("generated").unwrap(),
            representation: RepresentationMode::Native,
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

    fn uint8() -> ResolvedType {
        ResolvedType::new(
            WireKind::Elementary(Elementary::Uint(8)),
            RustType::Native(NativeInt::U8),
            false,
        )
    }

    fn bytes() -> ResolvedType {
        ResolvedType::new(
            WireKind::Elementary(Elementary::Bytes),
            RustType::Bytes,
            true,
        )
    }

    #[test]
    fn test_uint8_array_and_bytes_convert_differently() {
        let unit = empty_unit();
        let r = renderer(&unit);
        let list = uint8().into_array(None);
        let raw = bytes();

        assert_eq!(r.rust_type(&list.target), r.rust_type(&raw.target));
        assert_eq!(
            r.into_token("v", &list.wire, &list.target, 0),
            "Token::Array(v.into_iter().map(|item0| item0.into_token()).collect())"
        );
        assert_eq!(r.into_token("v", &raw.wire, &raw.target, 0), "Token::Bytes(v)");
        assert_eq!(
            r.from_token("t", &list.wire, &list.target, 0),
            "rt::array_from_token(t, |item0| <u8 as Tokenize>::from_token(item0))"
        );
        assert_eq!(r.from_token("t", &raw.wire, &raw.target, 0), "rt::bytes_from_token(t)");
    }

    #[test]
    fn test_nested_fixed_arrays_carry_lengths() {
        let unit = empty_unit();
        let r = renderer(&unit);
        let grid = uint8().into_array(Some(2)).into_array(Some(3));

        assert_eq!(r.rust_type(&grid.target), "[[u8; 2]; 3]");
        assert_eq!(
            r.param_type(&grid.wire),
            "ParamType::FixedArray(Box::new(ParamType::FixedArray(Box::new(ParamType::Uint(8)), 2)), 3)"
        );
        assert_eq!(
            r.from_token("t", &grid.wire, &grid.target, 0),
            "rt::fixed_array_from_token::<_, 3>(t, |item0| \
             rt::fixed_array_from_token::<_, 2>(item0, |item1| <u8 as Tokenize>::from_token(item1)))"
        );
    }

    #[test]
    fn test_wide_int_uses_explicit_conversion() {
        let unit = empty_unit();
        let r = renderer(&unit);
        let wire = WireKind::Elementary(Elementary::Int(256));

        assert_eq!(r.rust_type(&RustType::WideInt), "ethabi::Int");
        assert_eq!(r.into_token("x", &wire, &RustType::WideInt, 0), "Token::Int(x)");
        assert_eq!(r.from_token("t", &wire, &RustType::WideInt, 0), "rt::int_from_token(t)");
    }

    #[test]
    fn test_unknown_struct_falls_back_to_positional_name() {
        let unit = empty_unit();
        let r = renderer(&unit);
        assert_eq!(r.rust_type(&RustType::Struct(StructId(7))), "Struct7");
    }

    #[test]
    fn test_selector_formatting() {
        assert_eq!(format_bytes(&[0xa9, 0x05, 0x9c, 0xbb]), "a9059cbb");
        assert_eq!(byte_literals(&[0x0a, 0xff]), ["0x0a", "0xff"]);
    }
}
