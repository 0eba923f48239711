//! Code-block shielding
//!
//! Masks fenced code blocks and inline code spans behind opaque
//! placeholder tokens before any other transform runs, so that quote,
//! list, header, and citation rewrites can never touch literal code.
//! `unshield` restores every region byte-for-byte as the final pipeline
//! step; `unshield_latex` restores the LaTeX rendering instead
//! (`verbatim` environments and `\texttt{}` spans).
//!
//! The placeholder alphabet (`@@MDTEXCODE<n>@@`) contains no LaTeX
//! special characters and no Markdown structural markers, so every
//! intermediate transform passes placeholders through unchanged.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::error::{ConversionError, ConversionResult};

lazy_static! {
    static ref FENCED_BLOCK: Regex =
        Regex::new(r"(?ms)^```([A-Za-z0-9_+-]*)[ \t]*\r?\n(.*?)^```[ \t]*$").unwrap();
    static ref INLINE_CODE: Regex = Regex::new(r"`([^`\r\n]+)`").unwrap();
    static ref PLACEHOLDER: Regex = Regex::new(r"@@MDTEXCODE\d+@@").unwrap();
}

/// Kind of shielded region
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionKind {
    /// Fenced code block, with its optional language tag
    Fenced { language: Option<String> },
    /// Inline code span
    Inline,
}

/// One protected region: the exact original substring plus the inner
/// code body (fence markers and backticks stripped)
#[derive(Debug, Clone)]
pub struct ShieldedRegion {
    pub kind: RegionKind,
    pub original: String,
    body: String,
}

impl ShieldedRegion {
    /// LaTeX rendering of the protected code, body preserved verbatim
    pub fn to_latex(&self) -> String {
        match self.kind {
            RegionKind::Fenced { .. } => {
                format!("\\begin{{verbatim}}\n{}\\end{{verbatim}}", self.body)
            }
            RegionKind::Inline => format!("\\texttt{{{}}}", escape_texttt(&self.body)),
        }
    }
}

/// Mapping from placeholder token to protected region, in insertion order
#[derive(Debug, Clone, Default)]
pub struct ShieldTable {
    entries: IndexMap<String, ShieldedRegion>,
}

impl ShieldTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    pub fn get(&self, token: &str) -> Option<&ShieldedRegion> {
        self.entries.get(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ShieldedRegion)> {
        self.entries.iter()
    }

    fn insert(&mut self, token: String, region: ShieldedRegion) {
        self.entries.insert(token, region);
    }
}

/// Replace fenced code blocks and inline code spans with unique
/// placeholder tokens. Returns the shielded text and the reverse-lookup
/// table. An unterminated fence is simply not matched and stays in the
/// document untouched; see [`unterminated_fence`].
pub fn shield(text: &str) -> (String, ShieldTable) {
    let mut table = ShieldTable::new();
    let mut counter = 0usize;

    let after_fences = FENCED_BLOCK
        .replace_all(text, |caps: &regex::Captures| {
            let language = match caps[1].trim() {
                "" => None,
                lang => Some(lang.to_string()),
            };
            let token = fresh_placeholder(text, &table, &mut counter);
            table.insert(
                token.clone(),
                ShieldedRegion {
                    kind: RegionKind::Fenced { language },
                    original: caps[0].to_string(),
                    body: caps[2].to_string(),
                },
            );
            token
        })
        .into_owned();

    let shielded = INLINE_CODE
        .replace_all(&after_fences, |caps: &regex::Captures| {
            let token = fresh_placeholder(text, &table, &mut counter);
            table.insert(
                token.clone(),
                ShieldedRegion {
                    kind: RegionKind::Inline,
                    original: caps[0].to_string(),
                    body: caps[1].to_string(),
                },
            );
            token
        })
        .into_owned();

    (shielded, table)
}

/// Restore every placeholder to its exact original substring.
///
/// Restoration scans the text for placeholder-shaped tokens and
/// substitutes by table lookup, so a token a transform discarded along
/// with its surrounding text (e.g. a consumed section) is simply never
/// encountered, and a token a transform duplicated (e.g. a footnote
/// referenced twice) is restored at every occurrence.
pub fn unshield(text: &str, table: &ShieldTable) -> ConversionResult<String> {
    restore(text, table, |region| region.original.clone())
}

/// Restore every placeholder to the LaTeX rendering of its region
pub fn unshield_latex(text: &str, table: &ShieldTable) -> ConversionResult<String> {
    restore(text, table, |region| region.to_latex())
}

fn restore<F>(text: &str, table: &ShieldTable, mut render: F) -> ConversionResult<String>
where
    F: FnMut(&ShieldedRegion) -> String,
{
    let out = PLACEHOLDER
        .replace_all(text, |caps: &regex::Captures| match table.get(&caps[0]) {
            Some(region) => render(region),
            // Lookalike the document itself contained; placeholder
            // generation avoided it, leave it alone.
            None => caps[0].to_string(),
        })
        .into_owned();
    // Post-pipeline scan: an issued token still present after the single
    // substitution pass means a region rendered to text containing it.
    for m in PLACEHOLDER.find_iter(&out) {
        if table.contains(m.as_str()) {
            return Err(ConversionError::unresolved(m.as_str()));
        }
    }
    Ok(out)
}

/// Line number (1-based) of the first leftover fence marker, if any.
/// After shielding, any remaining fence line is unterminated.
pub fn unterminated_fence(shielded: &str) -> Option<usize> {
    for (i, line) in shielded.lines().enumerate() {
        if line.starts_with("```") {
            return Some(i + 1);
        }
    }
    None
}

/// Generate a placeholder guaranteed not to collide with document
/// content or with an already-issued token
fn fresh_placeholder(text: &str, table: &ShieldTable, counter: &mut usize) -> String {
    loop {
        let candidate = format!("@@MDTEXCODE{}@@", *counter);
        *counter += 1;
        if !text.contains(&candidate) && !table.contains(&candidate) {
            return candidate;
        }
    }
}

fn escape_texttt(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str(r"\textbackslash{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            '~' => out.push_str(r"\textasciitilde{}"),
            '{' | '}' | '$' | '&' | '#' | '%' | '_' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_roundtrip_fenced() {
        let input = "before\n```rust\nlet x = \"# not a header\";\n```\nafter";
        let (shielded, table) = shield(input);
        assert!(!shielded.contains("let x"));
        assert_eq!(table.len(), 1);
        assert_eq!(unshield(&shielded, &table).unwrap(), input);
    }

    #[test]
    fn test_roundtrip_inline() {
        let input = "use `foo_bar()` and `$PATH` here";
        let (shielded, table) = shield(input);
        assert!(!shielded.contains("foo_bar"));
        assert_eq!(table.len(), 2);
        assert_eq!(unshield(&shielded, &table).unwrap(), input);
    }

    #[test]
    fn test_roundtrip_preserves_backslashes() {
        let input = "```\n\\section{raw} $$ \"quoted\" > - 1.\n```\n";
        let (shielded, table) = shield(input);
        assert_eq!(unshield(&shielded, &table).unwrap(), input);
    }

    #[test]
    fn test_roundtrip_with_placeholder_lookalike_in_document() {
        // Document text that already contains placeholder syntax must not
        // collide with generated tokens.
        let input = "literal @@MDTEXCODE0@@ text and `code`";
        let (shielded, table) = shield(input);
        assert_eq!(table.len(), 1);
        assert!(!table.contains("@@MDTEXCODE0@@"));
        assert_eq!(unshield(&shielded, &table).unwrap(), input);
    }

    #[test]
    fn test_language_tag_captured() {
        let input = "```python\nprint(1)\n```";
        let (_, table) = shield(input);
        let region = table.iter().next().unwrap().1;
        assert_eq!(
            region.kind,
            RegionKind::Fenced {
                language: Some("python".to_string())
            }
        );
    }

    #[test]
    fn test_unterminated_fence_left_untouched() {
        let input = "text\n```rust\nno closing fence";
        let (shielded, table) = shield(input);
        assert!(table.is_empty());
        assert_eq!(shielded, input);
        assert_eq!(unterminated_fence(&shielded), Some(2));
    }

    #[test]
    fn test_unshield_ignores_discarded_tokens() {
        // A transform may consume a section along with the tokens in it
        let (shielded, table) = shield("keep `alpha`\ndrop `beta`\n");
        assert_eq!(table.len(), 2);
        let kept: String = shielded
            .lines()
            .filter(|l| l.starts_with("keep"))
            .collect();
        let restored = unshield(&kept, &table).unwrap();
        assert_eq!(restored, "keep `alpha`");
    }

    #[test]
    fn test_unshield_restores_duplicated_tokens() {
        // A transform may copy a token, e.g. a footnote referenced twice
        let (shielded, table) = shield("note `code` here");
        let doubled = format!("{0} and again {0}", shielded);
        let restored = unshield_latex(&doubled, &table).unwrap();
        assert_eq!(restored.matches("\\texttt{code}").count(), 2);
    }

    #[test]
    fn test_unshield_latex_fenced() {
        let (shielded, table) = shield("```\ncode & stuff\n```");
        let latex = unshield_latex(&shielded, &table).unwrap();
        assert!(latex.contains("\\begin{verbatim}\ncode & stuff\n\\end{verbatim}"));
    }

    #[test]
    fn test_unshield_latex_inline_escapes() {
        let (shielded, table) = shield("run `a_b & c` now");
        let latex = unshield_latex(&shielded, &table).unwrap();
        assert!(latex.contains("\\texttt{a\\_b \\& c}"));
    }

    #[test]
    fn test_shield_table_insertion_order() {
        let (_, table) = shield("`one` then `two` then `three`");
        let bodies: Vec<&str> = table.iter().map(|(_, r)| r.original.as_str()).collect();
        assert_eq!(bodies, vec!["`one`", "`two`", "`three`"]);
    }
}
