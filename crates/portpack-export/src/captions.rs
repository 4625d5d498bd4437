use std::path::Path;

use portpack_core::ProjectContext;

use crate::error::ExportError;
use crate::metadata::write_text;

/// Writes `caption.txt`, `credits.txt` and `hashtags.txt` into `pack_dir`.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if any file cannot be written.
pub fn write_caption_pack(pack_dir: &Path, ctx: &ProjectContext) -> Result<(), ExportError> {
    write_text(&pack_dir.join("caption.txt"), &caption(ctx))?;
    write_text(
        &pack_dir.join("credits.txt"),
        &format!("{}\n", ctx.credit_line.trim()),
    )?;
    write_text(
        &pack_dir.join("hashtags.txt"),
        &format!("{}\n", ctx.hashtags.trim()),
    )?;
    Ok(())
}

fn caption(ctx: &ProjectContext) -> String {
    let body = format!(
        "{} — {} ({})\n\n{}\n\n{}\n",
        ctx.project, ctx.location, ctx.year, ctx.credit_line, ctx.hashtags
    );
    format!("{}\n", body.trim())
}
