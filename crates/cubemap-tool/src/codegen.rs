use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use cubemap_engine::contract::{codegen, ShaderLanguage};

#[derive(Args)]
pub struct CodegenArgs {
    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn execute(lang: ShaderLanguage, args: CodegenArgs) -> Result<()> {
    // Refuse to emit definitions that disagree with the host layout.
    cubemap_engine::contract::verify_all().context("layout contract does not verify")?;

    let source = codegen::emit(lang).context("failed to generate shader prelude")?;

    match args.out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(&path, &source)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!(
                "wrote {} bytes of {} to {}",
                source.len(),
                lang.file_extension(),
                path.display()
            );
        }
        None => print!("{source}"),
    }

    Ok(())
}
