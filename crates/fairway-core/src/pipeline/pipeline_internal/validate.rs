use crate::catalog::{Catalog, HoleKind};
use crate::model::SubmissionRequest;
use crate::pipeline::{SubmissionOutcome, MAX_CODE_BYTES};

/// Catalogue checks. Size is checked separately because it still grants a trophy.
pub(crate) fn validate_impl(
    catalog: &Catalog,
    req: &SubmissionRequest,
) -> Result<HoleKind, SubmissionOutcome> {
    let kind = catalog
        .hole_kind(&req.hole)
        .ok_or(SubmissionOutcome::UnknownHole)?;
    if !catalog.accepts_lang(&req.lang) {
        return Err(SubmissionOutcome::UnknownLang);
    }
    Ok(kind)
}

pub(crate) fn is_oversized_impl(code: &str) -> bool {
    code.len() >= MAX_CODE_BYTES
}
