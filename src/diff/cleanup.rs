//! Semantic cleanup of a raw edit script.
//!
//! A minimal script is often unreadable ("J[-oh-]{+a+}n[-ny-]"): short
//! equalities sandwiched between edits are coincidental matches. Any
//! equality no longer than the edits on either side of it is folded into
//! those edits, then adjacent edits are merged into one removal followed
//! by one addition, with any shared prefix or suffix moved back out into
//! the neighbouring equalities.

use super::{DiffOperation, DiffSegment};

pub fn cleanup_semantic(mut script: Vec<DiffSegment>) -> Vec<DiffSegment> {
    let mut changed = false;
    // Indices of equalities seen since the last elimination.
    let mut equalities: Vec<usize> = Vec::new();
    // Index of the equality currently under consideration.
    let mut last_equality: Option<usize> = None;
    // Edit lengths (in chars) before and after the last equality.
    let (mut ins_before, mut del_before) = (0usize, 0usize);
    let (mut ins_after, mut del_after) = (0usize, 0usize);

    let mut pointer = 0usize;
    while pointer < script.len() {
        let operation = script[pointer].operation;
        let len = script[pointer].text.chars().count();
        match operation {
            DiffOperation::Unchanged => {
                equalities.push(pointer);
                ins_before = ins_after;
                del_before = del_after;
                ins_after = 0;
                del_after = 0;
                last_equality = Some(pointer);
            }
            DiffOperation::Added | DiffOperation::Removed => {
                if operation == DiffOperation::Added {
                    ins_after += len;
                } else {
                    del_after += len;
                }

                let eliminated = last_equality.filter(|&at| {
                    let eq_len = script[at].text.chars().count();
                    eq_len <= ins_before.max(del_before) && eq_len <= ins_after.max(del_after)
                });

                if let Some(at) = eliminated {
                    // Equality becomes a removal plus an addition of the same text.
                    let text = std::mem::take(&mut script[at].text);
                    script[at] = DiffSegment::new(DiffOperation::Removed, text.clone());
                    script.insert(at + 1, DiffSegment::new(DiffOperation::Added, text));

                    // Drop it, and the one before it, which may now be eligible
                    // too; rescan from just past the equality before that.
                    equalities.pop();
                    equalities.pop();
                    last_equality = None;
                    ins_before = 0;
                    del_before = 0;
                    ins_after = 0;
                    del_after = 0;
                    changed = true;

                    pointer = equalities.last().map_or(0, |&prev| prev + 1);
                    continue;
                }
            }
        }
        pointer += 1;
    }

    if changed {
        merge(script)
    } else {
        script
    }
}

/// Joins neighbouring segments of the same kind and reorders every run
/// of edits into a single removal followed by a single addition.
pub fn merge(script: Vec<DiffSegment>) -> Vec<DiffSegment> {
    let mut out: Vec<DiffSegment> = Vec::with_capacity(script.len());
    let mut removed = String::new();
    let mut added = String::new();
    // Text factored off the end of an edit run, owed to the next equality.
    let mut carry = String::new();

    for seg in script {
        match seg.operation {
            DiffOperation::Removed => removed.push_str(&seg.text),
            DiffOperation::Added => added.push_str(&seg.text),
            DiffOperation::Unchanged => {
                flush_edits(&mut out, &mut removed, &mut added, &mut carry);
                let mut text = std::mem::take(&mut carry);
                text.push_str(&seg.text);
                push_unchanged(&mut out, text);
            }
        }
    }
    flush_edits(&mut out, &mut removed, &mut added, &mut carry);
    if !carry.is_empty() {
        push_unchanged(&mut out, carry);
    }
    out
}

fn flush_edits(
    out: &mut Vec<DiffSegment>,
    removed: &mut String,
    added: &mut String,
    carry: &mut String,
) {
    if !removed.is_empty() && !added.is_empty() {
        let prefix = common_prefix_bytes(removed, added);
        if prefix > 0 {
            push_unchanged(out, removed[..prefix].to_string());
            removed.drain(..prefix);
            added.drain(..prefix);
        }
        let suffix = common_suffix_bytes(removed, added);
        if suffix > 0 {
            let tail = removed[removed.len() - suffix..].to_string();
            removed.truncate(removed.len() - suffix);
            added.truncate(added.len() - suffix);
            carry.insert_str(0, &tail);
        }
    }
    if !removed.is_empty() {
        out.push(DiffSegment::new(DiffOperation::Removed, std::mem::take(removed)));
    }
    if !added.is_empty() {
        out.push(DiffSegment::new(DiffOperation::Added, std::mem::take(added)));
    }
}

fn push_unchanged(out: &mut Vec<DiffSegment>, text: String) {
    if text.is_empty() {
        return;
    }
    match out.last_mut() {
        Some(last) if last.operation == DiffOperation::Unchanged => last.text.push_str(&text),
        _ => out.push(DiffSegment::new(DiffOperation::Unchanged, text)),
    }
}

fn common_prefix_bytes(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .take_while(|((_, x), y)| x == y)
        .last()
        .map_or(0, |((i, c), _)| i + c.len_utf8())
}

fn common_suffix_bytes(a: &str, b: &str) -> usize {
    a.chars()
        .rev()
        .zip(b.chars().rev())
        .take_while(|(x, y)| x == y)
        .map(|(c, _)| c.len_utf8())
        .sum()
}
