//! Page layout for the exported document.
//!
//! Produces a [`DocumentLayout`]: every page carries the title header, then
//! each file gets a bold `File: <path>` heading and its content in Courier,
//! wrapped to the text width and broken across pages when it reaches the
//! bottom margin. Coordinates are millimetres from the top-left corner.

use crate::core::encoding::to_latin1;
use crate::core::metrics::{FontFace, MM_PER_PT, monospace_capacity, text_width_mm};
use crate::domain::errors::ExportError;
use crate::domain::models::{CodeFiles, EncodePolicy};
use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
    pub bottom_margin_mm: f32,
    /// Horizontal padding inside a cell.
    pub cell_padding_mm: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

impl PageGeometry {
    pub fn a4() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_mm: 10.0,
            bottom_margin_mm: 15.0,
            cell_padding_mm: 1.0,
        }
    }

    fn cell_width(&self) -> f32 {
        self.width_mm - 2.0 * self.margin_mm
    }

    fn text_width(&self) -> f32 {
        self.cell_width() - 2.0 * self.cell_padding_mm
    }

    fn page_break_trigger(&self) -> f32 {
        self.height_mm - self.bottom_margin_mm
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Header,
    Heading,
    Code,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub kind: RunKind,
    pub text: String,
    pub font: FontFace,
    pub size_pt: f32,
    pub x_mm: f32,
    /// Distance of the baseline from the top edge of the page.
    pub baseline_mm: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub runs: Vec<TextRun>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub title: String,
    pub geometry: PageGeometry,
    pub pages: Vec<PageLayout>,
}

const HEADER_SIZE_PT: f32 = 14.0;
const HEADER_CELL_MM: f32 = 10.0;
const HEADER_GAP_MM: f32 = 5.0;
const HEADING_SIZE_PT: f32 = 12.0;
const HEADING_CELL_MM: f32 = 10.0;
const CODE_SIZE_PT: f32 = 8.0;
const CODE_LINE_MM: f32 = 5.0;
const SECTION_GAP_MM: f32 = 5.0;

#[derive(Debug, Clone, Copy)]
enum Align {
    Left,
    Center,
}

struct LayoutEngine {
    title: String,
    geometry: PageGeometry,
    pages: Vec<PageLayout>,
    y: f32,
}

impl LayoutEngine {
    fn new(title: String, geometry: PageGeometry) -> Self {
        let mut engine = Self {
            title,
            geometry,
            pages: Vec::new(),
            y: geometry.margin_mm,
        };
        engine.add_page();
        engine
    }

    fn add_page(&mut self) {
        self.pages.push(PageLayout::default());
        self.y = self.geometry.margin_mm;
        debug!("Starting page {}", self.pages.len());

        let title = self.title.clone();
        self.place(
            RunKind::Header,
            title,
            FontFace::HelveticaBold,
            HEADER_SIZE_PT,
            HEADER_CELL_MM,
            Align::Center,
        );
        self.y += HEADER_GAP_MM;
    }

    /// Place a one-line cell at the cursor, breaking to a new page first if it
    /// would cross the bottom margin.
    fn cell(&mut self, kind: RunKind, text: String, font: FontFace, size_pt: f32, height_mm: f32) {
        if self.y + height_mm > self.geometry.page_break_trigger() {
            self.add_page();
        }
        self.place(kind, text, font, size_pt, height_mm, Align::Left);
    }

    fn place(
        &mut self,
        kind: RunKind,
        text: String,
        font: FontFace,
        size_pt: f32,
        height_mm: f32,
        align: Align,
    ) {
        let g = self.geometry;
        let x_mm = match align {
            Align::Left => g.margin_mm + g.cell_padding_mm,
            Align::Center => {
                g.margin_mm + (g.cell_width() - text_width_mm(&text, font, size_pt)) / 2.0
            }
        };
        let baseline_mm = self.y + height_mm / 2.0 + 0.3 * size_pt * MM_PER_PT;

        if let Some(page) = self.pages.last_mut() {
            page.runs.push(TextRun {
                kind,
                text,
                font,
                size_pt,
                x_mm,
                baseline_mm,
            });
        }
        self.y += height_mm;
    }

    fn gap(&mut self, height_mm: f32) {
        self.y += height_mm;
    }

    fn finish(self) -> DocumentLayout {
        DocumentLayout {
            title: self.title,
            geometry: self.geometry,
            pages: self.pages,
        }
    }
}

/// Split `text` into the lines of a fixed-width block `capacity` characters wide.
///
/// Newlines always break. Over-long lines break at the last space that fits,
/// which is consumed; a line without spaces is cut at the capacity. A single
/// trailing newline does not produce an extra empty line.
pub fn wrap_lines(text: &str, capacity: usize) -> Vec<String> {
    let capacity = capacity.max(1);
    let text = text.strip_suffix('\n').unwrap_or(text);
    let mut lines = Vec::new();

    for line in text.split('\n') {
        let chars: Vec<char> = line.chars().collect();
        let mut start = 0;
        loop {
            let rest = &chars[start..];
            if rest.len() <= capacity {
                lines.push(rest.iter().collect());
                break;
            }
            // rest[capacity] is the first character that does not fit
            match rest[..=capacity].iter().rposition(|c| *c == ' ') {
                Some(sep) => {
                    lines.push(rest[..sep].iter().collect());
                    start += sep + 1;
                }
                None => {
                    lines.push(rest[..capacity].iter().collect());
                    start += capacity;
                }
            }
        }
    }

    lines
}

/// Lay out every collected file, in map order, under a repeating `title` header.
pub fn layout_document(
    files: &CodeFiles,
    title: &str,
    geometry: PageGeometry,
    policy: EncodePolicy,
) -> Result<DocumentLayout, ExportError> {
    debug!("Laying out {} files", files.len());
    let header = to_latin1(std::path::Path::new(""), title, policy)?.into_owned();
    let mut engine = LayoutEngine::new(header, geometry);
    let capacity = monospace_capacity(geometry.text_width(), CODE_SIZE_PT);

    for (path, content) in files {
        let heading = format!("File: {}", path.display());
        let heading = to_latin1(path, &heading, policy)?;
        engine.cell(
            RunKind::Heading,
            heading.into_owned(),
            FontFace::HelveticaBold,
            HEADING_SIZE_PT,
            HEADING_CELL_MM,
        );

        let content = to_latin1(path, content, policy)?;
        let lines = wrap_lines(&content, capacity);
        debug!("{}: {} lines", path.display(), lines.len());
        for line in lines {
            engine.cell(RunKind::Code, line, FontFace::Courier, CODE_SIZE_PT, CODE_LINE_MM);
        }
        engine.gap(SECTION_GAP_MM);
    }

    let layout = engine.finish();
    info!("Laid out {} pages", layout.pages.len());
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn files(entries: &[(&str, &str)]) -> CodeFiles {
        entries
            .iter()
            .map(|(path, content)| (PathBuf::from(path), content.to_string()))
            .collect()
    }

    fn runs(layout: &DocumentLayout) -> impl Iterator<Item = &TextRun> {
        layout.pages.iter().flat_map(|page| page.runs.iter())
    }

    /// Content lines rendered under the heading for `path`, across pages.
    fn section(layout: &DocumentLayout, path: &str) -> Vec<String> {
        let heading = format!("File: {}", path);
        runs(layout)
            .filter(|run| run.kind != RunKind::Header)
            .skip_while(|run| run.text != heading)
            .skip(1)
            .take_while(|run| run.kind == RunKind::Code)
            .map(|run| run.text.clone())
            .collect()
    }

    #[test]
    fn test_wrap_keeps_short_lines() {
        assert_eq!(wrap_lines("a\n\nb", 10), vec!["a", "", "b"]);
        assert_eq!(wrap_lines("a\n", 10), vec!["a"]);
        assert_eq!(wrap_lines("", 10), vec![""]);
    }

    #[test]
    fn test_wrap_breaks_at_last_space() {
        assert_eq!(wrap_lines("aaa bbb ccc", 8), vec!["aaa bbb", "ccc"]);
        assert_eq!(wrap_lines("aaaa bbbb", 4), vec!["aaaa", "bbbb"]);
    }

    #[test]
    fn test_wrap_hard_breaks_without_space() {
        assert_eq!(wrap_lines("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_empty_collection_still_has_header_page() {
        let layout =
            layout_document(&CodeFiles::new(), "Project Code Files", PageGeometry::a4(), EncodePolicy::Lossy)
                .unwrap();

        assert_eq!(layout.pages.len(), 1);
        assert_eq!(layout.pages[0].runs.len(), 1);
        assert_eq!(layout.pages[0].runs[0].kind, RunKind::Header);
        assert_eq!(layout.pages[0].runs[0].text, "Project Code Files");
    }

    #[test]
    fn test_header_is_centered() {
        let layout =
            layout_document(&CodeFiles::new(), "Title", PageGeometry::a4(), EncodePolicy::Lossy).unwrap();
        let header = &layout.pages[0].runs[0];
        let width = text_width_mm("Title", FontFace::HelveticaBold, 14.0);

        let left = header.x_mm - 10.0;
        let right = 200.0 - (header.x_mm + width);
        assert!((left - right).abs() < 1e-3);
    }

    #[test]
    fn test_section_round_trips_latin1_content() {
        let content = "function f() {\n    return 'café';\n}\n\n// end";
        let layout = layout_document(
            &files(&[("src/a.js", content), ("src/b.css", "body {}\n")]),
            "T",
            PageGeometry::a4(),
            EncodePolicy::Lossy,
        )
        .unwrap();

        assert_eq!(section(&layout, "src/a.js").join("\n"), content);
        assert_eq!(section(&layout, "src/b.css"), vec!["body {}"]);
        assert!(runs(&layout).all(|run| !run.text.contains('?')));
    }

    #[test]
    fn test_sections_follow_map_order() {
        let layout = layout_document(
            &files(&[("z.js", "1"), ("a.js", "2")]),
            "T",
            PageGeometry::a4(),
            EncodePolicy::Lossy,
        )
        .unwrap();

        let headings: Vec<&str> = runs(&layout)
            .filter(|run| run.kind == RunKind::Heading)
            .map(|run| run.text.as_str())
            .collect();
        assert_eq!(headings, vec!["File: z.js", "File: a.js"]);
    }

    #[test]
    fn test_lossy_replaces_unrenderable_characters() {
        let layout = layout_document(
            &files(&[("emoji.js", "launch(\"🚀\");")]),
            "T",
            PageGeometry::a4(),
            EncodePolicy::Lossy,
        )
        .unwrap();

        assert_eq!(section(&layout, "emoji.js"), vec!["launch(\"?\");"]);
    }

    #[test]
    fn test_tabs_and_invisible_spacing_become_printable() {
        let layout = layout_document(
            &files(&[("tabs.js", "\tindent();\nnb\u{A0}sp soft\u{AD}hy caf\u{E9}\n")]),
            "T",
            PageGeometry::a4(),
            EncodePolicy::Strict,
        )
        .unwrap();

        assert_eq!(section(&layout, "tabs.js"), vec!["    indent();", "nb sp soft-hy café"]);
    }

    #[test]
    fn test_strict_rejects_unrenderable_characters() {
        let err = layout_document(
            &files(&[("emoji.js", "launch(\"🚀\");")]),
            "T",
            PageGeometry::a4(),
            EncodePolicy::Strict,
        )
        .unwrap_err();

        match err {
            ExportError::Encode { path, ch, .. } => {
                assert_eq!(path, PathBuf::from("emoji.js"));
                assert_eq!(ch, '🚀');
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_overflow_repeats_header_on_every_page() {
        let content: String = (0..200).map(|i| format!("line {i}\n")).collect();
        let layout = layout_document(
            &files(&[("long.js", content.as_str())]),
            "Project Code Files",
            PageGeometry::a4(),
            EncodePolicy::Lossy,
        )
        .unwrap();

        // 49 code lines fit under the heading on the first page, 51 on the others
        assert_eq!(layout.pages.len(), 4);
        for page in &layout.pages {
            let first = &page.runs[0];
            assert_eq!(first.kind, RunKind::Header);
            assert_eq!(first.text, "Project Code Files");
            assert_eq!(first.baseline_mm, layout.pages[0].runs[0].baseline_mm);
            assert_eq!(page.runs.iter().filter(|r| r.kind == RunKind::Header).count(), 1);
        }

        let lines = section(&layout, "long.js");
        assert_eq!(lines.len(), 200);
        assert_eq!(lines[199], "line 199");
    }

    #[test]
    fn test_runs_stay_above_bottom_margin() {
        let content: String = (0..500).map(|i| format!("{i}\n")).collect();
        let geometry = PageGeometry::a4();
        let layout =
            layout_document(&files(&[("n.js", content.as_str())]), "T", geometry, EncodePolicy::Lossy).unwrap();

        for run in runs(&layout) {
            assert!(run.baseline_mm < geometry.height_mm - geometry.bottom_margin_mm);
        }
    }

    #[test]
    fn test_long_lines_wrap_to_text_width() {
        let long = "x".repeat(250);
        let layout =
            layout_document(&files(&[("w.js", long.as_str())]), "T", PageGeometry::a4(), EncodePolicy::Lossy)
                .unwrap();

        let lines = section(&layout, "w.js");
        assert_eq!(lines.iter().map(String::len).collect::<Vec<_>>(), vec![111, 111, 28]);
    }
}
