//! Lua annotation stub extraction for sol2-bound C++ engines.
//!
//! Scans the engine's declaration headers and its sol2 registration source,
//! rebuilds which native functions, methods and properties are exposed to Lua
//! (and under which names, with which types and docs), and renders LuaLS
//! `---@meta` stub files from that model.
//!
//! The scanners are deliberately narrow pattern matchers over the engine's
//! own idioms, not a C++ parser.
//!
//! # Example
//!
//! ```rust
//! use luagen_core::{GeneratorSettings, Generator, MemorySource, SourceLayout};
//!
//! let settings = GeneratorSettings {
//!     layout: SourceLayout {
//!         source_dir: "/engine".into(),
//!         ..SourceLayout::default()
//!     },
//!     ..GeneratorSettings::default()
//! };
//! let source = MemorySource::new()
//!     .with_file("/engine/scripthost.h", "class ScriptHost {\n    int GetTicks();\n};")
//!     .with_file("/engine/scripthost.cpp", "module.set_function(\"getTicks\", &ScriptHost::GetTicks, this);");
//!
//! let output = Generator::new(&settings, &source).run().unwrap();
//! assert_eq!(output.module.functions[0].script_name, "getTicks");
//! ```

pub mod bindings;
pub mod correlate;
pub mod declarations;
pub mod diagnostics;
pub mod docs;
pub mod emit;
pub mod error;
pub mod includes;
pub mod lexer;
pub mod model;
pub mod pipeline;
pub mod settings;
pub mod source;
pub mod types;

pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::{LuagenError, LuagenResult};
pub use model::{
    AggregateBindings, AggregateSymbolTable, BindingEntry, ExposedAggregate, FunctionSymbol,
    ModuleSymbolTable, ParameterSpec, PropertySymbol, SignatureEntry, SignatureTable,
};
pub use pipeline::{GenerationOutput, Generator, StubFile};
pub use settings::{BindingIdioms, GeneratorSettings, SourceLayout, StubSettings};
pub use source::{FsSource, MemorySource, SourceProvider};
pub use types::normalize_type;
