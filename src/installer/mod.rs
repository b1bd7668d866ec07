//! Installer script synthesis
//!
//! [`synthesize`] turns an ordered resource list into a self-contained install script.
//! Every block is guarded so re-running the script skips what is already installed,
//! and every step reports its own outcome without aborting the rest.
//!
//! One template per resource kind is evaluated against a [`DialectSyntax`] record,
//! so the dialects can only differ in syntax, never in the steps they take.

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::domain::EnrichedResource;
use crate::error::Result;

pub mod dialect;
pub mod dialects;
pub mod repo;
mod template;
mod writer;

pub use dialect::{Dialect, DialectSyntax};
pub use repo::{UNKNOWN_NODE_DIR, repo_dir_name};
pub use template::NODES_DIR;

use writer::ScriptWriter;

const APP_NAME: &str = "ComfyUI";

/// Resources that produce a block: those with a download URL
pub fn installable(resources: &[EnrichedResource]) -> impl Iterator<Item = &EnrichedResource> {
    resources
        .iter()
        .filter(|resource| !resource.download_url.trim().is_empty())
}

/// Synthesize an install script dated today
///
/// # Errors
///
/// Returns `NodefetchError::ScriptRender` if a dialect fragment fails to render.
pub fn synthesize(resources: &[EnrichedResource], dialect: Dialect) -> Result<String> {
    synthesize_at(resources, dialect, Local::now().date_naive())
}

/// Synthesize an install script with an explicit header date
///
/// Blocks are emitted in input order and carry nothing position-dependent, so
/// reordering the input only reorders the blocks.
///
/// # Errors
///
/// Returns `NodefetchError::ScriptRender` if a dialect fragment fails to render.
pub fn synthesize_at(
    resources: &[EnrichedResource],
    dialect: Dialect,
    date: NaiveDate,
) -> Result<String> {
    let syntax = dialect.syntax();
    let selected: Vec<&EnrichedResource> = installable(resources).collect();
    debug!(
        dialect = %dialect,
        total = resources.len(),
        emitted = selected.len(),
        "Synthesizing install script"
    );

    let mut writer = ScriptWriter::new(syntax)?;
    for line in syntax.prologue {
        writer.line(line);
    }
    writer.comment(&format!(
        "Install script generated by nodefetch on {}",
        date.format("%Y-%m-%d")
    ))?;
    writer.comment(&format!("Resources: {}", selected.len()))?;
    writer.comment(&format!(
        "Run from the root of your {APP_NAME} installation."
    ))?;
    if !syntax.environment.is_empty() {
        writer.blank();
        for line in syntax.environment {
            writer.line(line);
        }
    }

    for resource in selected {
        writer.blank();
        if resource.is_custom_node() {
            template::custom_node(&mut writer, resource)?;
        } else {
            template::model(&mut writer, resource)?;
        }
    }

    let done = format!("Done. Restart {APP_NAME} to load the new custom nodes and models.");
    writer.blank();
    writer.comment(&done)?;
    writer.echo(&done)?;
    for line in syntax.epilogue {
        writer.line(line);
    }
    Ok(writer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ResourceType, ScannedItem};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn node(raw: &str, url: &str) -> EnrichedResource {
        let mut r = EnrichedResource::unresolved(ScannedItem::new(raw, true));
        r.resource_type = ResourceType::CustomNode;
        r.download_url = url.to_string();
        r
    }

    fn model(raw: &str, resource_type: ResourceType, url: &str) -> EnrichedResource {
        let mut r = EnrichedResource::unresolved(ScannedItem::new(raw, false));
        r.resource_type = resource_type;
        r.download_url = url.to_string();
        r
    }

    /// Script body split into blank-line separated blocks, header and trailer removed
    fn blocks(script: &str) -> Vec<String> {
        let parts: Vec<&str> = script.split("\n\n").collect();
        parts[1..parts.len() - 1]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_custom_node_clone_is_guarded() {
        let script = synthesize_at(
            &[node("FooNode", "https://github.com/foo/bar")],
            Dialect::Posix,
            date(),
        )
        .unwrap();
        assert!(script.starts_with("#!/usr/bin/env bash\n"));
        assert!(script.contains("mkdir -p \"custom_nodes\""));
        assert!(script.contains("if [ ! -d \"bar\" ]; then"));
        assert!(script.contains(
            "git clone \"https://github.com/foo/bar\" \"bar\" && echo \"[OK] Cloned bar\" || echo \"[ERROR] Failed to clone bar\""
        ));
        assert!(script.contains("echo \"[SKIP] bar already exists\""));
    }

    #[test]
    fn test_post_clone_steps_are_independent() {
        let script = synthesize_at(
            &[node("FooNode", "https://github.com/foo/bar")],
            Dialect::Posix,
            date(),
        )
        .unwrap();
        for manifest in [".gitmodules", "requirements.txt", "install.py"] {
            assert!(script.contains(&format!("if [ -f \"{manifest}\" ]; then")));
        }
        assert!(script.contains("git submodule update --init --recursive && echo"));
        assert!(script.contains("pip install -r requirements.txt && echo"));
        assert!(script.contains("python install.py && echo"));
        // Three separate blocks, not an if/elif chain
        assert!(!script.contains("elif"));
        assert_eq!(script.matches("[WARN]").count(), 3);
    }

    #[test]
    fn test_model_download_is_guarded_and_resumable() {
        let script = synthesize_at(
            &[model(
                "v1-5-pruned.ckpt",
                ResourceType::Checkpoint,
                "https://huggingface.co/x/v1-5-pruned.ckpt",
            )],
            Dialect::Posix,
            date(),
        )
        .unwrap();
        assert!(script.contains("mkdir -p \"models/checkpoints\""));
        assert!(script.contains("if [ ! -f \"models/checkpoints/v1-5-pruned.ckpt\" ]; then"));
        assert!(script.contains(
            "wget -c \"https://huggingface.co/x/v1-5-pruned.ckpt\" -O \"models/checkpoints/v1-5-pruned.ckpt\""
        ));
        assert!(script.contains("[ERROR] Failed to download v1-5-pruned.ckpt"));
        assert!(script.contains("echo \"[SKIP] v1-5-pruned.ckpt already exists\""));
    }

    #[test]
    fn test_explicit_target_path_is_used() {
        let mut lora = model("style.safetensors", ResourceType::Lora, "https://civitai.com/api/download/models/1");
        lora.target_path = "models\\loras\\sd15".to_string();
        let script = synthesize_at(&[lora], Dialect::Posix, date()).unwrap();
        assert!(script.contains("mkdir -p \"models/loras/sd15\""));
        assert!(script.contains("-O \"models/loras/sd15/style.safetensors\""));
    }

    #[test]
    fn test_empty_urls_are_skipped() {
        let resources = vec![
            node("Skipped", ""),
            model("blank.pt", ResourceType::Embedding, "   "),
            node("Kept", "https://github.com/foo/kept"),
        ];
        let script = synthesize_at(&resources, Dialect::Posix, date()).unwrap();
        assert!(script.contains("# Resources: 1"));
        assert!(script.contains("\"kept\""));
        assert!(!script.contains("Skipped"));
        assert!(!script.contains("blank.pt"));
    }

    #[test]
    fn test_batch_dialect_environment_and_paths() {
        let resources = vec![
            node("FooNode", "https://github.com/foo/bar"),
            model("vae.safetensors", ResourceType::Vae, "https://huggingface.co/x/vae.safetensors"),
        ];
        let script = synthesize_at(&resources, Dialect::Batch, date()).unwrap();
        assert!(script.starts_with("@echo off\r\n"));
        assert!(script.contains("if exist \"..\\python_embeded\\python.exe\" ("));
        assert!(script.contains("\"%PYTHON%\" -m pip install -r requirements.txt"));
        assert!(script.contains("\"%PYTHON%\" install.py"));
        assert!(script.contains("if not exist \"models\\vae\\vae.safetensors\" ("));
        assert!(script.contains("Invoke-WebRequest -Uri 'https://huggingface.co/x/vae.safetensors' -OutFile 'models\\vae\\vae.safetensors'"));
        assert!(script.contains("catch { Write-Host '[ERROR] Failed to download vae.safetensors' }"));
        assert!(script.trim_end().ends_with("endlocal"));
        assert!(script.contains("\r\npause\r\n"));
        assert!(!script.replace("\r\n", "").contains('\n'));
    }

    /// Dialect-neutral outline of the last `count` resource blocks: guards, directory
    /// moves and every reported outcome, in order
    fn outline(script: &str, count: usize) -> Vec<String> {
        fn quoted(line: &str) -> String {
            line.split('"').nth(1).unwrap_or_default().replace('\\', "/")
        }
        fn messages(line: &str) -> Vec<String> {
            let mut found = Vec::new();
            let mut rest = line;
            while let Some(start) = ["[OK]", "[ERROR]", "[WARN]", "[SKIP]"]
                .iter()
                .filter_map(|marker| rest.find(marker))
                .min()
            {
                let tail = &rest[start..];
                let end = tail.find(['"', '\'', ')']).unwrap_or(tail.len());
                found.push(tail[..end].to_string());
                rest = &tail[end..];
            }
            found
        }

        let script = script.replace("\r\n", "\n");
        let parts: Vec<&str> = script.split("\n\n").collect();
        let blocks = &parts[parts.len() - 1 - count..parts.len() - 1];

        let mut steps = Vec::new();
        for line in blocks.iter().flat_map(|block| block.lines()).map(str::trim) {
            if line.starts_with("mkdir -p ") || line.contains(" mkdir ") {
                steps.push(format!("ensure {}", quoted(line)));
            } else if line.starts_with("pushd ") {
                steps.push(format!("enter {}", quoted(line)));
            } else if line.starts_with("popd") {
                steps.push("leave".to_string());
            } else if line.starts_with("if [ !") || line.starts_with("if not exist") {
                steps.push(format!("unless {}", quoted(line)));
            } else if line.starts_with("if [") || line.starts_with("if exist") {
                steps.push(format!("when {}", quoted(line)));
            } else if line == "else" || line == ") else (" {
                steps.push("else".to_string());
            } else if line == "fi" || line == ")" {
                steps.push("end".to_string());
            } else {
                steps.extend(messages(line));
            }
        }
        steps
    }

    #[test]
    fn test_dialects_take_identical_steps() {
        let resources = vec![
            node("FooNode", "https://github.com/foo/bar"),
            model("vae.safetensors", ResourceType::Vae, "https://huggingface.co/x/vae.safetensors"),
        ];
        let posix = synthesize_at(&resources, Dialect::Posix, date()).unwrap();
        let batch = synthesize_at(&resources, Dialect::Batch, date()).unwrap();

        let expected: Vec<String> = [
            "ensure custom_nodes",
            "enter custom_nodes",
            "unless bar",
            "[OK] Cloned bar",
            "[ERROR] Failed to clone bar",
            "else",
            "[SKIP] bar already exists",
            "end",
            "when bar",
            "enter bar",
            "when .gitmodules",
            "[OK] Submodules done for bar",
            "[WARN] Submodules failed for bar",
            "end",
            "when requirements.txt",
            "[OK] Requirements done for bar",
            "[WARN] Requirements failed for bar",
            "end",
            "when install.py",
            "[OK] Install script done for bar",
            "[WARN] Install script failed for bar",
            "end",
            "leave",
            "end",
            "leave",
            "ensure models/vae",
            "unless models/vae/vae.safetensors",
            "[OK] Downloaded vae.safetensors",
            "[ERROR] Failed to download vae.safetensors",
            "else",
            "[SKIP] vae.safetensors already exists",
            "end",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        assert_eq!(outline(&posix, 2), expected);
        assert_eq!(outline(&batch, 2), expected);

        assert!(batch.contains("    echo [SKIP] bar already exists\r\n"));
        for manifest in [".gitmodules", "requirements.txt", "install.py"] {
            assert!(batch.contains(&format!("if exist \"{manifest}\" (")));
        }
        assert!(batch.contains("    echo [SKIP] vae.safetensors already exists\r\n"));
    }

    #[test]
    fn test_trailer_asks_for_restart() {
        for dialect in [Dialect::Posix, Dialect::Batch] {
            let script = synthesize_at(&[], dialect, date()).unwrap();
            assert!(script.contains("Restart ComfyUI"));
        }
    }

    #[test]
    fn test_synthesis_is_deterministic_apart_from_date() {
        let resources = vec![
            node("FooNode", "https://github.com/foo/bar"),
            model("a.safetensors", ResourceType::Lora, "https://civitai.com/a.safetensors"),
        ];
        let first = synthesize(&resources, Dialect::Posix).unwrap();
        let second = synthesize(&resources, Dialect::Posix).unwrap();
        let strip = |s: &str| {
            s.lines()
                .filter(|l| !l.contains("generated by nodefetch on"))
                .collect::<Vec<_>>()
                .join("\n")
        };
        assert_eq!(strip(&first), strip(&second));
        assert_eq!(
            synthesize_at(&resources, Dialect::Posix, date()).unwrap(),
            synthesize_at(&resources, Dialect::Posix, date()).unwrap()
        );
    }

    #[test]
    fn test_reordering_only_reorders_blocks() {
        let a = node("FooNode", "https://github.com/foo/bar");
        let b = model("a.safetensors", ResourceType::Lora, "https://civitai.com/a.safetensors");
        let c = node("Other", "git@github.com:baz/qux.git");

        let forward =
            synthesize_at(&[a.clone(), b.clone(), c.clone()], Dialect::Posix, date()).unwrap();
        let reversed = synthesize_at(&[c, b, a], Dialect::Posix, date()).unwrap();

        let forward_blocks = blocks(&forward);
        let mut reversed_blocks = blocks(&reversed);
        assert_eq!(forward_blocks.len(), 3);
        reversed_blocks.reverse();
        assert_eq!(forward_blocks, reversed_blocks);
    }

    #[test]
    fn test_hostile_values_are_escaped() {
        let r = model(
            "x\";rm -rf ~;\".safetensors",
            ResourceType::Lora,
            "https://civitai.com/$(reboot).safetensors",
        );
        let script = synthesize_at(&[r], Dialect::Posix, date()).unwrap();
        assert!(script.contains("\\$(reboot)"));
        assert!(!script.contains("\"x\";rm"));
    }
}
