//! Output formatting for the `stree` command line

use crate::tree::{Occurrence, TreeSummary};
use crate::utils::InputLine;
use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

/// Print tree statistics as aligned `key: value` lines
pub fn print_stats(out: &mut impl WriteColor, summary: &TreeSummary) -> io::Result<()> {
    let rows = [
        ("sequences", summary.sequences.to_string()),
        ("text length", summary.text_len.to_string()),
        ("nodes", summary.nodes.to_string()),
        ("leaves", summary.leaves.to_string()),
        ("internal nodes", summary.internal_nodes.to_string()),
        ("terminators", format!("{:?}", summary.terminators).to_lowercase()),
        ("phases", summary.construction.phases.to_string()),
        ("extensions", summary.construction.extensions.to_string()),
        ("edge hops", summary.construction.edge_hops.to_string()),
        ("suffix link jumps", summary.construction.link_jumps.to_string()),
        ("splits", summary.construction.splits.to_string()),
    ];

    for (key, value) in rows {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        write!(out, "{:>18}", key)?;
        out.reset()?;
        writeln!(out, ": {}", value)?;
    }
    Ok(())
}

/// Print tree statistics as JSON
pub fn print_stats_json(out: &mut impl Write, summary: &TreeSummary) -> io::Result<()> {
    let json = serde_json::to_string_pretty(summary).map_err(io::Error::other)?;
    writeln!(out, "{}", json)
}

/// Print `pattern: yes|no` for every pattern
pub fn print_contains(out: &mut impl WriteColor, results: &[(String, bool)]) -> io::Result<()> {
    for (pattern, found) in results {
        write!(out, "{}: ", pattern)?;
        if *found {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
            write!(out, "yes")?;
        } else {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
            write!(out, "no")?;
        }
        out.reset()?;
        writeln!(out)?;
    }
    Ok(())
}

/// Print each occurrence as `line:column:content` with the match highlighted.
///
/// `lines[sequence]` is the input line a sequence was built from.
pub fn print_occurrences(
    out: &mut impl WriteColor,
    occurrences: &[Occurrence],
    pattern_len: usize,
    lines: &[InputLine],
) -> io::Result<()> {
    for occ in occurrences {
        let Some(line) = lines.get(occ.sequence) else {
            continue;
        };
        print_match_line(out, line, occ.position, pattern_len)?;
    }
    Ok(())
}

fn print_match_line(
    out: &mut impl WriteColor,
    line: &InputLine,
    position: usize,
    pattern_len: usize,
) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(out, "{}", line.number)?;
    out.reset()?;
    write!(out, ":")?;
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(out, "{}", position + 1)?;
    out.reset()?;
    write!(out, ":")?;

    let symbols = &line.symbols;
    let start = position.min(symbols.len());
    let end = (position + pattern_len).min(symbols.len());

    let before: String = symbols[..start].iter().collect();
    let matched: String = symbols[start..end].iter().collect();
    let after: String = symbols[end..].iter().collect();

    write!(out, "{}", before)?;
    if !matched.is_empty() {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(out, "{}", matched)?;
        out.reset()?;
    }
    writeln!(out, "{}", after)?;
    Ok(())
}

/// Print motifs as `count<TAB>motif`, most frequent first
pub fn print_motifs(out: &mut impl WriteColor, motifs: &[(Vec<char>, usize)]) -> io::Result<()> {
    for (motif, count) in motifs {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "{}", count)?;
        out.reset()?;
        let text: String = motif.iter().collect();
        writeln!(out, "\t{}", text)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::SuffixTree;
    use termcolor::NoColor;

    fn render(f: impl FnOnce(&mut NoColor<Vec<u8>>) -> io::Result<()>) -> String {
        let mut out = NoColor::new(Vec::new());
        f(&mut out).unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn test_print_contains() {
        let results = vec![("AN".to_string(), true), ("XY".to_string(), false)];
        let text = render(|out| print_contains(out, &results));
        assert_eq!(text, "AN: yes\nXY: no\n");
    }

    #[test]
    fn test_print_occurrences() {
        let lines = crate::utils::split_lines(b"BANANA\n\nANANAS\n");
        let mut tree = SuffixTree::new();
        for line in &lines {
            tree.add_sequence(&line.symbols, true).unwrap();
        }
        let occ = tree.find_occurrences(&['N', 'A', 'S']);
        let text = render(|out| print_occurrences(out, &occ, 3, &lines));
        assert_eq!(text, "3:4:ANANAS\n");

        let occ = tree.find_occurrences(&['B', 'A']);
        let text = render(|out| print_occurrences(out, &occ, 2, &lines));
        assert_eq!(text, "1:1:BANANA\n");
    }

    #[test]
    fn test_print_stats() {
        let tree = SuffixTree::from_text("AAGT");
        let text = render(|out| print_stats(out, &tree.stats()));
        assert!(text.contains("         sequences: 1\n"));
        assert!(text.contains("            leaves: 5\n"));
        assert!(text.contains("       terminators: unique\n"));

        let mut json = Vec::new();
        print_stats_json(&mut json, &tree.stats()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["leaves"], 5);
        assert_eq!(value["terminators"], "unique");
    }

    #[test]
    fn test_print_motifs() {
        let motifs = vec![(vec!['A', 'N'], 4), (vec!['N', 'A'], 3)];
        let text = render(|out| print_motifs(out, &motifs));
        assert_eq!(text, "4\tAN\n3\tNA\n");
    }
}
