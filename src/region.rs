//! Guarded-region extraction and merge.
//!
//! Generated text is partitioned into machine-owned regions delimited by
//! `//GEN-BEGIN:<name>` / `//GEN-END:<name>` marker lines and developer-owned
//! free text. Merging replaces only regions whose name appears in both the
//! freshly rendered text and the existing file; everything else is preserved
//! byte-identical. Regions never nest.
//!
//! The merge works over an exact span partition of the existing text rather
//! than by patching substring offsets, which removes the line-boundary
//! bookkeeping while keeping the same external contract: unmatched regions
//! are never inserted, and an unterminated region truncates extraction. Both
//! of those formerly silent outcomes are reported through the return values
//! and logged as warnings.

use indexmap::IndexMap;

/// Begin-marker signature; the region name is the remainder of the line.
pub const REGION_BEGIN: &str = "//GEN-BEGIN:";
/// End-marker signature; matched as the signature concatenated with the name.
pub const REGION_END: &str = "//GEN-END:";

/// A marker-delimited span of generated text.
///
/// `block_text` runs from the start of the begin-marker line through the end
/// of the end-marker line, inclusive of the trailing line terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardedRegion {
    pub name: String,
    pub block_text: String,
}

/// One span of a segmented text: either developer-owned free text or a
/// guarded region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Free(String),
    Region(GuardedRegion),
}

/// Exact partition of a text into free and region spans. Concatenating the
/// spans always reproduces the input byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation {
    pub spans: Vec<Span>,
    /// False when a begin marker had no matching end marker; the dangling
    /// tail is kept as free text.
    pub complete: bool,
}

/// Result of merging freshly rendered regions into existing text.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub text: String,
    /// Region names replaced with fresh content, in existing-file order.
    pub replaced: Vec<String>,
    /// Fresh region names with no counterpart in the existing text. Their
    /// content is not inserted anywhere.
    pub skipped: Vec<String>,
    /// False when the existing text contained an unterminated region.
    pub existing_complete: bool,
}

/// Index of the position one past the end of the line containing `from`
/// (after the terminator, or end of text).
fn line_end(text: &str, from: usize) -> usize {
    text[from..]
        .find('\n')
        .map(|offset| from + offset + 1)
        .unwrap_or(text.len())
}

/// Partition `text` into free and region spans.
///
/// The scan looks for the begin signature anywhere in the text (any textual
/// occurrence matches, including inside unrelated comments) and extends the
/// block backward to the start of that line. The end marker is found by a
/// plain substring search for the signature concatenated with the exact
/// trimmed name.
pub fn segment(text: &str) -> Segmentation {
    let mut spans = Vec::new();
    let mut complete = true;
    let mut pos = 0usize;

    while let Some(found) = text[pos..].find(REGION_BEGIN) {
        let marker_at = pos + found;
        let block_start = text[..marker_at]
            .rfind('\n')
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let begin_line_end = line_end(text, marker_at);
        let name = text[marker_at + REGION_BEGIN.len()..begin_line_end]
            .trim()
            .to_string();

        let end_signature = format!("{REGION_END}{name}");
        match text[begin_line_end..].find(&end_signature) {
            Some(offset) => {
                let end_at = begin_line_end + offset;
                let block_end = line_end(text, end_at);
                if block_start > pos {
                    spans.push(Span::Free(text[pos..block_start].to_string()));
                }
                spans.push(Span::Region(GuardedRegion {
                    name,
                    block_text: text[block_start..block_end].to_string(),
                }));
                pos = block_end;
            }
            None => {
                tracing::warn!(
                    region = %name,
                    "unterminated guarded region; extraction truncated here"
                );
                complete = false;
                break;
            }
        }
    }

    if pos < text.len() {
        spans.push(Span::Free(text[pos..].to_string()));
    }

    Segmentation { spans, complete }
}

/// Extract all well-formed guarded regions from `text`, in order.
///
/// The boolean is `true` only if every opened region was properly closed; an
/// unterminated region truncates the scan and returns the regions collected
/// so far.
pub fn extract_regions(text: &str) -> (Vec<GuardedRegion>, bool) {
    let segmentation = segment(text);
    let regions = segmentation
        .spans
        .into_iter()
        .filter_map(|span| match span {
            Span::Region(region) => Some(region),
            Span::Free(_) => None,
        })
        .collect();
    (regions, segmentation.complete)
}

/// Merge `new_regions` into `existing`, replacing regions whose name appears
/// in both and preserving everything else byte-identical.
///
/// New regions absent from the existing text are skipped, never inserted:
/// a file only gains new region kinds when it is first generated. Duplicate
/// region names in the existing text refresh the first occurrence only.
pub fn merge(existing: &str, new_regions: &[GuardedRegion]) -> MergeOutcome {
    let segmentation = segment(existing);
    let mut fresh: IndexMap<&str, &GuardedRegion> = new_regions
        .iter()
        .map(|region| (region.name.as_str(), region))
        .collect();

    let mut text = String::with_capacity(existing.len());
    let mut replaced = Vec::new();
    for span in &segmentation.spans {
        match span {
            Span::Free(free) => text.push_str(free),
            Span::Region(old) => match fresh.shift_remove(old.name.as_str()) {
                Some(new) => {
                    text.push_str(&new.block_text);
                    replaced.push(old.name.clone());
                }
                None => text.push_str(&old.block_text),
            },
        }
    }

    let skipped: Vec<String> = fresh.keys().map(|name| name.to_string()).collect();
    for name in &skipped {
        tracing::warn!(
            region = %name,
            "generated region has no counterpart in the existing file; skipped"
        );
    }

    MergeOutcome {
        text,
        replaced,
        skipped,
        existing_complete: segmentation.complete,
    }
}
