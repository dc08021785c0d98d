//! End-to-end generation: includes → type location → declarations → bindings
//! → correlation. Rendering is left to [`crate::emit`].

use crate::bindings::BindingScanner;
use crate::correlate::{correlate_aggregate, correlate_module};
use crate::declarations::scan_declarations;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::emit::{render_aggregate, render_file, render_module};
use crate::error::LuagenResult;
use crate::includes::{locate_type, IncludeResolver};
use crate::model::{AggregateSymbolTable, ExposedAggregate, ModuleSymbolTable};
use crate::settings::GeneratorSettings;
use crate::source::SourceProvider;
use serde::Serialize;

/// Everything one run produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationOutput {
    pub module: ModuleSymbolTable,
    /// In registration order.
    pub aggregates: Vec<AggregateSymbolTable>,
    pub diagnostics: Diagnostics,
}

/// A rendered stub ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubFile {
    /// `<name>.lua`
    pub file_name: String,
    pub contents: String,
}

impl GenerationOutput {
    /// Module stub first, then one stub per aggregate.
    pub fn render(&self, settings: &GeneratorSettings) -> Vec<StubFile> {
        let mut files = Vec::with_capacity(self.aggregates.len() + 1);
        files.push(StubFile {
            file_name: format!("{}.lua", self.module.name),
            contents: render_file(&render_module(&self.module, &settings.stub)),
        });
        for aggregate in &self.aggregates {
            files.push(StubFile {
                file_name: format!("{}.lua", aggregate.name),
                contents: render_file(&render_aggregate(aggregate, &settings.stub)),
            });
        }
        files
    }
}

pub struct Generator<'a> {
    settings: &'a GeneratorSettings,
    source: &'a dyn SourceProvider,
}

impl<'a> Generator<'a> {
    pub fn new(settings: &'a GeneratorSettings, source: &'a dyn SourceProvider) -> Self {
        Self { settings, source }
    }

    pub fn run(&self) -> LuagenResult<GenerationOutput> {
        let layout = &self.settings.layout;
        let host_header = layout.host_header_path();
        let host_source = layout.host_source_path();

        tracing::info!("Loading header files");
        let mut includes = IncludeResolver::new(layout);
        includes.load(self.source, &host_header)?;
        includes.load(self.source, &host_source)?;

        let registrations = self.source.read(&host_source)?;
        let scanner = BindingScanner::new(&registrations, &self.settings.bindings);

        tracing::info!(module = %self.settings.stub.module_name, "Resolving module functions");
        let host_declarations = scan_declarations(&host_header, &self.source.read(&host_header)?)?;
        if host_declarations.is_empty() {
            tracing::warn!(path = %host_header.display(), "Host header declares no functions");
        }
        let module = correlate_module(
            &self.settings.stub.module_name,
            &scanner.module_functions(),
            &host_declarations,
        );

        tracing::info!("Resolving class definitions");
        let mut diagnostics = Diagnostics::new();
        let mut aggregates = Vec::new();
        for exposed in scanner.exposed_aggregates() {
            let Some(header) = locate_type(self.source, includes.candidates(), &exposed.name)? else {
                diagnostics.report(Diagnostic::UnresolvedType {
                    aggregate: exposed.name.clone(),
                });
                continue;
            };
            tracing::info!(aggregate = %exposed.name, header = %header.display(), "Found declaring header");
            aggregates.push(self.aggregate_table(&scanner, &exposed, header, &mut diagnostics)?);
        }

        Ok(GenerationOutput {
            module,
            aggregates,
            diagnostics,
        })
    }

    fn aggregate_table(
        &self,
        scanner: &BindingScanner<'_>,
        exposed: &ExposedAggregate,
        header: std::path::PathBuf,
        diagnostics: &mut Diagnostics,
    ) -> LuagenResult<AggregateSymbolTable> {
        let mut declarations = scan_declarations(&header, &self.source.read(&header)?)?;
        let mut bindings = scanner.aggregate_bindings(&exposed.name);

        if exposed.inherits_node {
            let node = &self.settings.bindings.node_aggregate;
            let node_header = self.settings.layout.node_header_path();
            bindings.append(scanner.aggregate_bindings(node));
            declarations.extend(scan_declarations(&node_header, &self.source.read(&node_header)?)?);
        }

        Ok(correlate_aggregate(
            &exposed.name,
            header,
            &bindings,
            &declarations,
            diagnostics,
        ))
    }
}
