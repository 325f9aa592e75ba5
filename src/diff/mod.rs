pub mod cleanup;
pub mod myers;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{Display, EnumIter, EnumString};

/// Separator placed between the groups of a collection diff when rendered.
pub const GROUP_SEPARATOR: &str = ", ";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DiffOperation {
    Unchanged,
    Added,
    Removed,
}

impl DiffOperation {
    pub fn css_class(self) -> &'static str {
        match self {
            DiffOperation::Unchanged => "diff-unchanged",
            DiffOperation::Added => "diff-added",
            DiffOperation::Removed => "diff-removed",
        }
    }

    /// How a segment of this kind is wrapped in plain-text output.
    pub fn plain_markers(self) -> (&'static str, &'static str) {
        match self {
            DiffOperation::Unchanged => ("", ""),
            DiffOperation::Added => ("{+", "+}"),
            DiffOperation::Removed => ("[-", "-]"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSegment {
    pub operation: DiffOperation,
    pub text: String,
}

impl DiffSegment {
    pub fn new(operation: DiffOperation, text: impl Into<String>) -> Self {
        Self {
            operation,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DiffKind {
    /// Character-level diff of the values as text.
    Scalar,
    /// Set comparison; each segment is a comma-joined group of elements.
    Collection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueDiff {
    pub kind: DiffKind,
    pub segments: Vec<DiffSegment>,
}

impl ValueDiff {
    /// Diffs two field values. Never fails; an empty segment list means
    /// there is nothing to highlight.
    ///
    /// If either side is an array both are treated as unordered sets (a
    /// non-array side counts as empty). Otherwise equal JSON values give no
    /// segments and anything else is compared as text, so `1` against
    /// `"1"` comes back as a single unchanged segment.
    pub fn between(left: &Value, right: &Value) -> Self {
        if left.is_array() || right.is_array() {
            Self {
                kind: DiffKind::Collection,
                segments: collection_segments(as_elements(left), as_elements(right)),
            }
        } else if left == right {
            Self {
                kind: DiffKind::Scalar,
                segments: Vec::new(),
            }
        } else {
            Self {
                kind: DiffKind::Scalar,
                segments: text_segments(&value_text(left), &value_text(right)),
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn separator(&self) -> &'static str {
        match self.kind {
            DiffKind::Scalar => "",
            DiffKind::Collection => GROUP_SEPARATOR,
        }
    }

    /// `<span class="diff-…">` markup, one span per segment.
    pub fn to_html(&self) -> String {
        self.segments
            .iter()
            .map(|s| {
                format!(
                    "<span class=\"{}\">{}</span>",
                    s.operation.css_class(),
                    escape_html(&s.text)
                )
            })
            .collect::<Vec<_>>()
            .join(self.separator())
    }

    /// Terminal-friendly form: `[-removed-]` and `{+added+}`.
    pub fn to_plain(&self) -> String {
        self.segments
            .iter()
            .map(|s| {
                let (open, close) = s.operation.plain_markers();
                format!("{}{}{}", open, s.text, close)
            })
            .collect::<Vec<_>>()
            .join(self.separator())
    }
}

/// Segments describing how `left` differs from `right`.
pub fn diff_values(left: &Value, right: &Value) -> Vec<DiffSegment> {
    ValueDiff::between(left, right).segments
}

/// Character diff of two strings, after semantic cleanup.
pub fn diff_text(left: &str, right: &str) -> Vec<DiffSegment> {
    if left == right {
        return Vec::new();
    }
    text_segments(left, right)
}

fn text_segments(left: &str, right: &str) -> Vec<DiffSegment> {
    let script = cleanup::merge(myers::edit_script(left, right));
    cleanup::cleanup_semantic(script)
}

fn collection_segments(left: Vec<&Value>, right: Vec<&Value>) -> Vec<DiffSegment> {
    if left == right {
        return Vec::new();
    }

    let left = dedup(left);
    let right = dedup(right);

    let left_only: Vec<&Value> = left.iter().copied().filter(|x| !right.contains(x)).collect();
    let common: Vec<&Value> = left.iter().copied().filter(|x| right.contains(x)).collect();
    let right_only: Vec<&Value> = right.iter().copied().filter(|x| !left.contains(x)).collect();

    [
        (DiffOperation::Removed, left_only),
        (DiffOperation::Unchanged, common),
        (DiffOperation::Added, right_only),
    ]
    .into_iter()
    .filter(|(_, group)| !group.is_empty())
    .map(|(op, group)| {
        let text = group
            .into_iter()
            .map(value_text)
            .collect::<Vec<_>>()
            .join(GROUP_SEPARATOR);
        DiffSegment::new(op, text)
    })
    .collect()
}

fn as_elements(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        _ => Vec::new(),
    }
}

/// Keeps the first occurrence of each element.
fn dedup(items: Vec<&Value>) -> Vec<&Value> {
    let mut out: Vec<&Value> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

/// How a value reads in a table cell: strings bare, null empty.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
