// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the docseek CLI.
//!
//! OneDark for dark terminals, One Light for light ones. Respects `NO_COLOR`
//! and drops color entirely when stdout is not a TTY, so piped output stays
//! plain text.
//!
//! # Theme detection order
//!
//! 1. `DOCSEEK_THEME` env var ("dark" or "light")
//! 2. `COLORFGBG` env var (terminal background hint)
//! 3. Default to dark theme

use std::sync::OnceLock;
use std::time::Duration;

use docseek::binary::{DocseekHeader, FileLayout};
use docseek::build::BuildSummary;
use docseek::SearchResult;

// Box drawing constants - width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 72;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("DOCSEEK_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg", bg 7 and up (except 8) is a light background
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(Ok(bg)) = colorfgbg.split(';').next_back().map(str::parse::<u8>) {
            if bg >= 7 && bg != 8 {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117);
    pub const GREEN: (u8, u8, u8) = (152, 195, 121);
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123);
    pub const BLUE: (u8, u8, u8) = (97, 175, 239);
    pub const MAGENTA: (u8, u8, u8) = (198, 120, 221);
    pub const CYAN: (u8, u8, u8) = (86, 182, 194);
    pub const GRAY: (u8, u8, u8) = (92, 99, 112);
    pub const BRIGHT_GREEN: (u8, u8, u8) = (166, 226, 46);
    pub const BRIGHT_CYAN: (u8, u8, u8) = (102, 217, 239);
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73);
    pub const GREEN: (u8, u8, u8) = (80, 161, 79);
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1);
    pub const BLUE: (u8, u8, u8) = (64, 120, 242);
    pub const MAGENTA: (u8, u8, u8) = (166, 38, 164);
    pub const CYAN: (u8, u8, u8) = (1, 132, 188);
    pub const GRAY: (u8, u8, u8) = (160, 161, 167);
    pub const BRIGHT_GREEN: (u8, u8, u8) = (68, 140, 39);
    pub const BRIGHT_CYAN: (u8, u8, u8) = (1, 112, 158);
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(MAGENTA);
theme_color!(CYAN);
theme_color!(GRAY);
theme_color!(BRIGHT_GREEN);
theme_color!(BRIGHT_CYAN);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply theme color with optional modifiers
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

fn border(color_fn: fn() -> String) -> (String, &'static str) {
    if use_colors() {
        (color_fn(), RESET)
    } else {
        (String::new(), "")
    }
}

/// Visible length, excluding ANSI codes
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Right-pad a styled string to a fixed visible width
pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

/// Left-pad a styled string to a fixed visible width
pub fn pad_left(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", " ".repeat(width - visible), s)
    }
}

/// Cut `s` to at most `max` chars, marking the cut with "...".
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// │ content          │
pub fn row(content: &str) {
    let (b, r) = border(GRAY);
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!("{}│{}{}{}{}│{}", b, r, content, " ".repeat(pad), b, r);
}

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let (b, r) = border(GRAY);
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!("{}┌{}{}{}{}┐{}", b, r, label_part, b, "─".repeat(remaining), r);
}

/// ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    let (b, r) = border(GRAY);
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!("{}├{}{}{}{}┤{}", b, r, label_part, b, "─".repeat(remaining), r);
}

/// └──────────────────┘
pub fn section_bot() {
    let (b, r) = border(GRAY);
    println!("{}└{}┘{}", b, "─".repeat(BOX_WIDTH), r);
}

/// ╔══ centered title ══╗ then ╚══╝
pub fn title_box(text: &str) {
    let (b, r) = border(BLUE);
    let colored = themed(BRIGHT_CYAN, &[BOLD], text);
    let total_pad = BOX_WIDTH.saturating_sub(visible_len(&colored));
    let left_pad = total_pad / 2;
    println!("{}╔{}╗{}", b, "═".repeat(BOX_WIDTH), r);
    println!(
        "{}║{}{}{}{}{}║{}",
        b,
        r,
        " ".repeat(left_pad),
        colored,
        " ".repeat(total_pad - left_pad),
        b,
        r
    );
    println!("{}╚{}╝{}", b, "═".repeat(BOX_WIDTH), r);
}

fn kv(key: &str, value: &str) {
    row(&format!("  {} {}", pad_right(&themed(GRAY, &[], key), 18), value));
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Format bytes as human-readable size
pub fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

/// Savings percentage, green when smaller
pub fn savings_colored(raw: usize, compressed: usize) -> String {
    if raw == 0 {
        return themed(GRAY, &[], "N/A");
    }
    let saved_pct = (1.0 - compressed as f64 / raw as f64) * 100.0;
    if saved_pct.abs() < 0.5 {
        themed(GRAY, &[], "0%")
    } else if saved_pct > 0.0 {
        themed(GREEN, &[BOLD], &format!("-{:.0}%", saved_pct))
    } else {
        themed(RED, &[BOLD], &format!("+{:.0}%", -saved_pct))
    }
}

pub fn check_badge(ok: bool) -> String {
    if ok {
        themed(GREEN, &[BOLD], "✓ valid")
    } else {
        themed(RED, &[BOLD], "✗ mismatch")
    }
}

/// BM25 scores are small floats; brighter means more relevant.
pub fn score_value(score: f64) -> String {
    let text = format!("{:>7.3}", score);
    if score >= 10.0 {
        themed(BRIGHT_GREEN, &[BOLD], &text)
    } else if score >= 3.0 {
        themed(GREEN, &[], &text)
    } else if score >= 1.0 {
        themed(YELLOW, &[], &text)
    } else {
        themed(GRAY, &[], &text)
    }
}

pub fn timing(elapsed: Duration) -> String {
    let ms = elapsed.as_secs_f64() * 1000.0;
    let text = format!("{:.2} ms", ms);
    if ms < 5.0 {
        themed(GREEN, &[], &text)
    } else if ms < 50.0 {
        themed(YELLOW, &[], &text)
    } else {
        themed(RED, &[], &text)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// REPORTS
// ═══════════════════════════════════════════════════════════════════════════

pub fn print_build_summary(summary: &BuildSummary, elapsed: Duration) {
    println!();
    section_top("INDEX BUILT");
    if !summary.enabled {
        row(&format!(
            "  {}",
            themed(YELLOW, &[], "search disabled in manifest, nothing written")
        ));
        section_bot();
        return;
    }

    kv("documents", &summary.documents.to_string());
    kv("terms", &summary.terms.to_string());
    kv("postings", &summary.postings.to_string());
    kv("index size", &format_size(summary.index_bytes));
    if summary.failed_pages > 0 {
        kv(
            "failed pages",
            &themed(RED, &[BOLD], &summary.failed_pages.to_string()),
        );
    }
    if summary.title_fallbacks > 0 {
        kv(
            "title fallbacks",
            &themed(YELLOW, &[], &summary.title_fallbacks.to_string()),
        );
    }
    kv("time", &timing(elapsed));

    section_mid("OUTPUT");
    if let Some(path) = &summary.index_path {
        row(&format!("  {}", truncate(&path.display().to_string(), BOX_WIDTH - 4)));
    }
    if let Some(path) = &summary.json_path {
        row(&format!("  {}", truncate(&path.display().to_string(), BOX_WIDTH - 4)));
    }
    if let Some(url) = summary.client_config.get("indexUrl").and_then(|v| v.as_str()) {
        kv("client fetches", &themed(CYAN, &[], url));
    }
    section_bot();
}

/// Layout of an index file, section by section.
pub fn print_layout(path: &str, total_size: usize, layout: &FileLayout, brotli_size: usize) {
    let header = &layout.header;
    let offsets = &layout.offsets;

    println!();
    title_box(&format!("DOCSEEK INDEX v{}", header.version));

    section_top("FILE");
    kv("path", &truncate(path, BOX_WIDTH - 24));
    kv("size", &format_size(total_size));
    kv(
        "brotli",
        &format!(
            "{} ({})",
            format_size(brotli_size),
            savings_colored(total_size, brotli_size)
        ),
    );
    kv("crc32", &check_badge(layout.checksum_ok()));
    if !layout.checksum_ok() {
        kv(
            "",
            &themed(
                GRAY,
                &[DIM],
                &format!(
                    "stored {:08x}, computed {:08x}",
                    layout.footer.crc32, layout.computed_crc32
                ),
            ),
        );
    }

    section_mid("HEADER");
    kv("documents", &header.doc_count.to_string());
    kv("terms", &header.term_count.to_string());
    kv("avg body length", &format!("{:.1} chars", header.avg_dl));
    kv("flags", &format!("{:#04x}", header.flags));

    section_mid("SECTIONS");
    let sections = [
        ("HEADER", (0, DocseekHeader::SIZE)),
        ("DOCS", offsets.docs),
        ("VOCABULARY", offsets.vocabulary),
        ("POSTINGS", offsets.postings),
        ("FOOTER", offsets.footer),
    ];
    for (name, (offset, end)) in sections {
        let size = end.saturating_sub(offset);
        let share = if total_size == 0 {
            0.0
        } else {
            size as f64 / total_size as f64 * 100.0
        };
        row(&format!(
            "  {} {} {} {}",
            pad_right(&themed(MAGENTA, &[BOLD], name), 12),
            pad_left(&themed(GRAY, &[], &format!("@{}", offset)), 10),
            pad_left(&format_size(size), 10),
            themed(GRAY, &[DIM], &format!("{:>5.1}%", share)),
        ));
    }
    section_bot();
}

pub fn print_results(query: &str, results: &[SearchResult], elapsed: Duration) {
    println!();
    section_top(&format!("SEARCH \"{}\"", truncate(query, 40)));
    if results.is_empty() {
        row(&format!("  {}", themed(GRAY, &[], "no results")));
    }
    for (rank, result) in results.iter().enumerate() {
        if rank > 0 {
            row("");
        }
        row(&format!(
            "  {} {} {}",
            themed(GRAY, &[], &format!("{:>2}.", rank + 1)),
            score_value(result.score),
            themed(BRIGHT_CYAN, &[BOLD], &truncate(&result.title, BOX_WIDTH - 16)),
        ));
        row(&format!(
            "             {}",
            themed(BLUE, &[], &truncate(&result.url, BOX_WIDTH - 14))
        ));
        if !result.matches.is_empty() {
            row(&format!(
                "             {}",
                themed(GRAY, &[], &truncate(&result.matches.join(", "), BOX_WIDTH - 14))
            ));
        }
        if !result.snippet.is_empty() {
            row(&format!(
                "             {}",
                themed(GRAY, &[DIM], &truncate(&result.snippet, BOX_WIDTH - 14))
            ));
        }
    }
    section_mid("STATS");
    kv("results", &results.len().to_string());
    kv("time", &timing(elapsed));
    section_bot();
}
