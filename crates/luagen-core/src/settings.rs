//! Engine settings: where the sources live and which registration idioms to recognize.
//!
//! The defaults describe the engine tree the tool was written for
//! (`scripthost.h`/`scripthost.cpp` next to each other, the node base in
//! `../node/node.h`, library headers under `libabyss/include`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    pub layout: SourceLayout,
    pub bindings: BindingIdioms,
    pub stub: StubSettings,
}

/// File layout of the native sources. Relative paths resolve against `source_dir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceLayout {
    pub source_dir: PathBuf,
    /// Declares the host class whose methods back module functions.
    pub host_header: PathBuf,
    /// Contains every registration call site.
    pub host_source: PathBuf,
    /// Declares the generic node aggregate.
    pub node_header: PathBuf,
    /// Root that `#include <library_prefix/...>` directives resolve against.
    pub library_root: PathBuf,
    pub library_prefix: String,
    /// Follow includes of resolved headers as well as those of the seed files.
    pub transitive_includes: bool,
}

impl SourceLayout {
    pub fn host_header_path(&self) -> PathBuf {
        self.resolve(&self.host_header)
    }

    pub fn host_source_path(&self) -> PathBuf {
        self.resolve(&self.host_source)
    }

    pub fn node_header_path(&self) -> PathBuf {
        self.resolve(&self.node_header)
    }

    pub fn library_root_path(&self) -> PathBuf {
        self.resolve(&self.library_root)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        use path_clean::PathClean;
        self.source_dir.join(path).clean()
    }
}

impl Default for SourceLayout {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("apps/abyssengine/src/engine"),
            host_header: PathBuf::from("scripthost.h"),
            host_source: PathBuf::from("scripthost.cpp"),
            node_header: PathBuf::from("../node/node.h"),
            library_root: PathBuf::from("../../../../libabyss/include"),
            library_prefix: "libabyss".to_string(),
            transitive_includes: false,
        }
    }
}

/// Text idioms of the sol2 registration code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingIdioms {
    /// Variable holding the script module table (`module.set_function(...)`).
    pub module_variable: String,
    /// Class whose members back module functions.
    pub host_class: String,
    /// Factory call whose argument names a host member (`InitializeTableFor(`).
    pub factory_call: String,
    /// Plain usertype registration (`module.new_usertype<`).
    pub usertype_call: String,
    /// Usertype registration that also installs the node capability.
    pub node_usertype_call: String,
    /// Marks a property registration (`sol::property(`).
    pub property_wrapper: String,
    /// Name of the generic node aggregate.
    pub node_aggregate: String,
    /// Fixed variable the node capability registers through.
    pub node_variable: String,
    /// Template placeholder used in node registrations (`T` in `&T::GetX`).
    pub node_placeholder: String,
}

impl Default for BindingIdioms {
    fn default() -> Self {
        Self {
            module_variable: "module".to_string(),
            host_class: "ScriptHost".to_string(),
            factory_call: "InitializeTableFor(".to_string(),
            usertype_call: "module.new_usertype<".to_string(),
            node_usertype_call: "CreateLuaObjectType<".to_string(),
            property_wrapper: "sol::property(".to_string(),
            node_aggregate: "Node".to_string(),
            node_variable: "nodeType".to_string(),
            node_placeholder: "T".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StubSettings {
    /// Global table the module functions live in.
    pub module_name: String,
    /// Written as `---version: <version>` below `---@meta`.
    pub version: String,
}

impl Default for StubSettings {
    fn default() -> Self {
        Self {
            module_name: "abyss".to_string(),
            version: "0.1".to_string(),
        }
    }
}
