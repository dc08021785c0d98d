//! Full pipeline over a small engine tree on disk.

use luagen_core::emit::GENERATED_BANNER;
use luagen_core::{
    Diagnostic, FsSource, GenerationOutput, Generator, GeneratorSettings, LuagenError,
    SourceLayout,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SCRIPTHOST_H: &str = r##"#ifndef ABYSS_SCRIPTHOST_H
#define ABYSS_SCRIPTHOST_H

#include "../node/sprite.h"
#include <libabyss/formats/palette.h>
#include <sol/sol.hpp>

namespace AbyssEngine {

class ScriptHost {
  public:
    explicit ScriptHost(Engine *engine);

    /// \brief Writes a message to the log.
    /// \param level The log level.
    /// \param message The message to write.
    void LuaLog(std::string_view level, std::string_view message);

    /// \brief Returns the engine tick count.
    /// \return Milliseconds since startup.
    [[nodiscard]] uint32_t LuaGetTicks() const;

    std::unique_ptr<Sprite> LuaCreateSprite(std::string_view path, std::string_view palette);
};

} // namespace AbyssEngine
#endif // ABYSS_SCRIPTHOST_H
"##;

const SCRIPTHOST_CPP: &str = r##"#include "scripthost.h"
#include "../node/node.h"

namespace AbyssEngine {

void ScriptHost::Initialize() {
    auto module = _lua.create_named_table("abyss");
    module.set_function("log", &ScriptHost::LuaLog, this);
    module.set_function("getTicks", &ScriptHost::LuaGetTicks, this);
    module.set_function("createSprite", &ScriptHost::LuaCreateSprite, this);
    module.set_function("shutdown", &ScriptHost::LuaShutdown, this);

    auto spriteType = CreateLuaObjectType<Sprite>(module, "Sprite", sol::no_constructor);
    spriteType["bottomOrigin"] = sol::property(&Sprite::GetIsBottomOrigin, &Sprite::SetIsBottomOrigin);
    spriteType["cellIndex"] = sol::property(&Sprite::GetCellIndex, &Sprite::SetCellIndex);
    spriteType["secret"] = sol::property(&Sprite::GetSecret);
    spriteType["play"] = &Sprite::Play;
    spriteType["rewind"] = &Sprite::Rewind;

    auto paletteType = module.new_usertype<LibAbyss::Palette>("Palette", sol::no_constructor);

    auto labelType = module.new_usertype<Label>("Label", sol::no_constructor);
}

template <typename T> sol::usertype<T> ScriptHost::CreateLuaObjectType(sol::table &module, std::string_view name) {
    auto nodeType = module.new_usertype<T>(name, sol::no_constructor);
    nodeType["x"] = sol::property(&T::GetX, &T::SetX);
    nodeType["appendChild"] = &T::AppendChild;
    return nodeType;
}

} // namespace AbyssEngine
"##;

const SPRITE_H: &str = r##"#pragma once
#include "node.h"

namespace AbyssEngine {

class Sprite : public Node {
  public:
    /// \brief Starts playing the animation.
    /// \param loop Whether the animation should loop.
    void Play(bool loop);

    /// \return True when the sprite is anchored at its bottom edge.
    [[nodiscard]] bool GetIsBottomOrigin() const;
    void SetIsBottomOrigin(bool bottomOrigin);

    /// \return The current animation cell.
    [[nodiscard]] uint32_t GetCellIndex() const;
    void SetCellIndex(uint32_t cellIndex);
};

} // namespace AbyssEngine
"##;

const NODE_H: &str = r##"#pragma once

namespace AbyssEngine {

class Node {
  public:
    virtual ~Node() = default;

    /// \return The horizontal position.
    [[nodiscard]] int GetX() const;
    void SetX(int x);

    /// \brief Adds a child node.
    /// \param child The node to append.
    void AppendChild(Node *child);
};

} // namespace AbyssEngine
"##;

const PALETTE_H: &str = r##"#pragma once

namespace LibAbyss {
class Palette {
  public:
    /// \brief Number of colors.
    [[nodiscard]] int ColorCount() const;
};
} // namespace LibAbyss
"##;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn engine_tree() -> (TempDir, GeneratorSettings) {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "apps/abyssengine/src/engine/scripthost.h", SCRIPTHOST_H);
    write(root, "apps/abyssengine/src/engine/scripthost.cpp", SCRIPTHOST_CPP);
    write(root, "apps/abyssengine/src/node/sprite.h", SPRITE_H);
    write(root, "apps/abyssengine/src/node/node.h", NODE_H);
    write(root, "libabyss/include/libabyss/formats/palette.h", PALETTE_H);

    let settings = GeneratorSettings {
        layout: SourceLayout {
            source_dir: root.join("apps/abyssengine/src/engine"),
            ..SourceLayout::default()
        },
        ..GeneratorSettings::default()
    };
    (dir, settings)
}

fn run(settings: &GeneratorSettings) -> GenerationOutput {
    let source = FsSource::new();
    Generator::new(settings, &source).run().unwrap()
}

fn with_banner(body: &str) -> String {
    format!("{}\n{}\n{}\n{}", GENERATED_BANNER[0], GENERATED_BANNER[1], GENERATED_BANNER[2], body)
}

#[test]
fn test_module_stub() {
    let (_dir, settings) = engine_tree();
    let files = run(&settings).render(&settings);

    assert_eq!(files[0].file_name, "abyss.lua");
    assert_eq!(
        files[0].contents,
        with_banner(
            "---@meta
---version: 0.1

---@class abyss
abyss = {}

---Writes a message to the log.
---@param level string @ The log level.
---@param message string @ The message to write.
function abyss.log(level, message) end

---Returns the engine tick count.
---@return number @ Milliseconds since startup.
function abyss.getTicks() end

---No description set in scripthost.h:23.
---@param path string @ No description set in scripthost.h:23.
---@param palette string @ No description set in scripthost.h:23.
---@return Sprite @ No description set in scripthost.h:23.
function abyss.createSprite(path, palette) end
"
        )
    );
}

#[test]
fn test_aggregate_stub_with_node_capability() {
    let (_dir, settings) = engine_tree();
    let files = run(&settings).render(&settings);

    assert_eq!(files[1].file_name, "Sprite.lua");
    assert_eq!(
        files[1].contents,
        with_banner(
            "---@meta
---version: 0.1

---@class Sprite
Sprite = {
---True when the sprite is anchored at its bottom edge.
---@type boolean
bottomOrigin = false,

---The current animation cell.
---@type number
cellIndex = 0,

---The horizontal position.
---@type number
x = 0,

}

---Starts playing the animation.
---@param loop boolean @ Whether the animation should loop.
function Sprite:play(loop) end

---Adds a child node.
---@param child Node @ The node to append.
function Sprite:appendChild(child) end
"
        )
    );
}

#[test]
fn test_aggregate_without_bindings_and_library_header() {
    let (dir, settings) = engine_tree();
    let output = run(&settings);

    let palette = &output.aggregates[1];
    assert_eq!(palette.name, "Palette");
    assert_eq!(
        palette.header,
        dir.path().join("libabyss/include/libabyss/formats/palette.h")
    );

    let files = output.render(&settings);
    assert_eq!(files[2].file_name, "Palette.lua");
    assert!(files[2].contents.ends_with("---@class Palette\nPalette = {}\n"));
}

#[test]
fn test_diagnostics_cover_unmatched_methods_and_unresolved_types() {
    let (_dir, settings) = engine_tree();
    let output = run(&settings);

    assert_eq!(
        output.diagnostics.iter().cloned().collect::<Vec<_>>(),
        vec![
            Diagnostic::UnmatchedMethod {
                aggregate: "Sprite".to_string(),
                target: "Sprite::Rewind".to_string(),
            },
            Diagnostic::UnresolvedType {
                aggregate: "Label".to_string(),
            },
        ]
    );
    // Unmatched properties and module functions are dropped without a report.
    assert_eq!(output.aggregates.len(), 2);
    assert!(output.module.functions.iter().all(|f| f.script_name != "shutdown"));
    assert!(output.aggregates[0].properties.iter().all(|p| p.script_name != "secret"));
}

#[test]
fn test_generation_is_deterministic() {
    let (_dir, settings) = engine_tree();
    let first = run(&settings).render(&settings);
    let second = run(&settings).render(&settings);
    assert_eq!(first, second);
}

#[test]
fn test_missing_registration_source_is_fatal() {
    let (dir, settings) = engine_tree();
    fs::remove_file(dir.path().join("apps/abyssengine/src/engine/scripthost.cpp")).unwrap();

    let source = FsSource::new();
    let err = Generator::new(&settings, &source).run().unwrap_err();
    assert!(matches!(err, LuagenError::Io { .. }));
}
