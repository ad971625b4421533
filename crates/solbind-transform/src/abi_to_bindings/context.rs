use super::naming::NameScope;
use super::struct_synthesizer::StructSynthesizer;
use super::type_resolver::{parse_syntax, wrap_dimensions, ResolveFailure, TypeResolver};
use super::GenerationOptions;
use solbind_core::{
    BindgenError, Diagnostic, Elementary, Parameter, Reporter, ResolvedType, Result, RustType,
    StructDefinition, WireKind,
};

/// State shared by every declaration of one contract while it is being compiled.
pub struct GenerationContext<'r> {
    pub options: GenerationOptions,
    resolver: TypeResolver,
    structs: StructSynthesizer,
    reporter: &'r mut dyn Reporter,
    precision_losses: Vec<String>,
}

impl<'r> GenerationContext<'r> {
    pub fn new(options: GenerationOptions, reporter: &'r mut dyn Reporter) -> Self {
        Self {
            resolver: TypeResolver::new(options.representation),
            options,
            structs: StructSynthesizer::new(),
            reporter,
            precision_losses: Vec::new(),
        }
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        forward(self.reporter, diagnostic);
    }

    /// Resolves one parameter of the declaration labelled `origin`, interning any tuple shapes.
    ///
    /// Integer types that native mode cannot hold are recorded rather than failing immediately,
    /// so that one error can name every affected declaration. See [`Self::check_precision`].
    pub fn resolve_parameter(&mut self, param: &Parameter, origin: &str) -> Result<ResolvedType> {
        let syntax = parse_syntax(param, origin)?;

        if !syntax.is_tuple() {
            return match self.resolver.resolve(&syntax) {
                Ok(resolved) => Ok(resolved),
                Err(ResolveFailure::PrecisionLoss(type_string)) => {
                    let entry = format!("{} (`{}`)", origin, type_string);
                    if !self.precision_losses.contains(&entry) {
                        self.precision_losses.push(entry);
                    }
                    Ok(placeholder(&syntax.dimensions))
                }
                Err(ResolveFailure::Tuple) => Err(BindgenError::InvalidType {
                    type_string: param.type_string.clone(),
                    context: origin.to_string(),
                    reason: "tuple type outside the struct synthesizer".to_string(),
                }),
            };
        }

        let mut fields = Vec::with_capacity(param.components.len());
        for component in &param.components {
            let resolved = self.resolve_parameter(component, origin)?;
            fields.push((component.name.clone(), resolved));
        }

        let is_dynamic = fields.iter().any(|(_, ty)| ty.is_dynamic);
        let id = self.structs.intern(param, fields, origin);
        let element = ResolvedType::new(WireKind::Tuple(id), RustType::Struct(id), is_dynamic);
        Ok(wrap_dimensions(element, &syntax.dimensions))
    }

    pub fn resolve_all(&mut self, params: &[Parameter], origin: &str) -> Result<Vec<ResolvedType>> {
        params
            .iter()
            .map(|param| self.resolve_parameter(param, origin))
            .collect()
    }

    /// Fails with every recorded precision loss, if any.
    pub fn check_precision(&self) -> Result<()> {
        if self.precision_losses.is_empty() {
            return Ok(());
        }
        Err(BindgenError::UnsupportedPrecision {
            affected: self.precision_losses.clone(),
        })
    }

    pub fn struct_count(&self) -> usize {
        self.structs.len()
    }

    /// Names every interned tuple shape. Consumes the arena; later tuples cannot be interned.
    pub fn finish_structs(
        &mut self,
        scope: &mut NameScope,
        contract_type: &str,
    ) -> Vec<StructDefinition> {
        let structs = std::mem::take(&mut self.structs);
        let reporter = &mut *self.reporter;
        structs.finalize(scope, contract_type, &mut |diagnostic: Diagnostic| {
            forward(reporter, diagnostic)
        })
    }
}

fn forward(reporter: &mut dyn Reporter, diagnostic: Diagnostic) {
    tracing::warn!(kind = ?diagnostic.kind, "{}", diagnostic.message);
    reporter.report(diagnostic);
}

/// Stand-in for a type native mode rejected. Never reaches a compilation unit.
fn placeholder(dimensions: &[Option<usize>]) -> ResolvedType {
    let element = ResolvedType::new(
        WireKind::Elementary(Elementary::Uint(256)),
        RustType::WideUint,
        false,
    );
    wrap_dimensions(element, dimensions)
}
