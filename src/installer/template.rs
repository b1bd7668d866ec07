//! Per-kind resource blocks shared by every dialect

use minijinja::context;

use super::dialect::Fragment;
use super::repo::repo_dir_name;
use super::writer::ScriptWriter;
use crate::domain::EnrichedResource;
use crate::error::Result;

/// Container directory for cloned custom nodes
pub const NODES_DIR: &str = "custom_nodes";

const CLONE: &str = "git clone {{ url | quote }} {{ dir | quote }}";

/// Optional steps run inside a present node directory: manifest, command, label
const POST_CLONE_STEPS: &[(&str, &str, &str)] = &[
    (
        ".gitmodules",
        "git submodule update --init --recursive",
        "Submodules",
    ),
    (
        "requirements.txt",
        "{{ pip }} install -r requirements.txt",
        "Requirements",
    ),
    ("install.py", "{{ python }} install.py", "Install script"),
];

fn heading(writer: &mut ScriptWriter<'_>, resource: &EnrichedResource) -> Result<()> {
    let name = resource.name.trim();
    let name = if name.is_empty() {
        resource.raw_name()
    } else {
        name
    };
    writer.comment(&format!("{}: {name}", resource.resource_type))
}

/// Clone a custom node repository unless already present, then run its setup steps
pub(super) fn custom_node(writer: &mut ScriptWriter<'_>, resource: &EnrichedResource) -> Result<()> {
    let syntax = writer.syntax();
    let url = resource.download_url.trim();
    let dir = repo_dir_name(url);

    heading(writer, resource)?;
    writer.path_line(Fragment::EnsureDir, NODES_DIR)?;
    writer.path_line(Fragment::EnterDir, NODES_DIR)?;

    writer.open(Fragment::IfDirMissing, &dir)?;
    writer.echo(&format!("Cloning {dir}..."))?;
    let clone = writer.render_str(CLONE, context! { url, dir })?;
    writer.checked(
        &clone,
        &format!("[OK] Cloned {dir}"),
        &format!("[ERROR] Failed to clone {dir}"),
    )?;
    writer.else_branch();
    writer.echo(&format!("[SKIP] {dir} already exists"))?;
    writer.close();

    writer.open(Fragment::IfDirPresent, &dir)?;
    writer.path_line(Fragment::EnterDir, &dir)?;
    for (manifest, command, label) in POST_CLONE_STEPS {
        let command = writer.render_str(
            command,
            context! { pip => syntax.pip, python => syntax.python },
        )?;
        writer.open(Fragment::IfFilePresent, manifest)?;
        writer.checked(
            &command,
            &format!("[OK] {label} done for {dir}"),
            &format!("[WARN] {label} failed for {dir}"),
        )?;
        writer.close();
    }
    writer.line(syntax.leave_dir);
    writer.close();

    writer.line(syntax.leave_dir);
    Ok(())
}

/// Download a model file into its target directory unless already present
pub(super) fn model(writer: &mut ScriptWriter<'_>, resource: &EnrichedResource) -> Result<()> {
    let syntax = writer.syntax();
    let raw_name = resource.raw_name();
    let directory = syntax.join_path([resource.effective_target_path()]);
    let file_name = syntax.join_path([raw_name]);

    heading(writer, resource)?;
    if file_name.is_empty() {
        return writer.echo(&format!("[WARN] Skipping {raw_name}: no usable file name"));
    }
    let destination = syntax.join_path([directory.as_str(), file_name.as_str()]);
    // A raw name may carry its own sub-directory
    if let Some((parent, _)) = destination.rsplit_once(syntax.separator) {
        writer.path_line(Fragment::EnsureDir, parent)?;
    }

    writer.open(Fragment::IfFileMissing, &destination)?;
    writer.echo(&format!("Downloading {raw_name}..."))?;
    writer.fetch(
        resource.download_url.trim(),
        &destination,
        &format!("[OK] Downloaded {raw_name}"),
        &format!("[ERROR] Failed to download {raw_name}"),
    )?;
    writer.else_branch();
    writer.echo(&format!("[SKIP] {raw_name} already exists"))?;
    writer.close();
    Ok(())
}
