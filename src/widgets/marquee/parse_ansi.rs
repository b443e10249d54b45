// tokio-marquee/src/widgets/marquee/parse_ansi.rs
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

pub use ratatui::style::{Color, Style};

use super::{ESCAPE_MARKER, is_terminator};

/// Turn a rendered marquee body into a ratatui line, one span per style run.
///
/// SGR sequences update the running style; any other escape sequence is
/// dropped. An unterminated sequence swallows the rest of the input.
pub fn parse_ansi_line(s: impl AsRef<str>) -> Line<'static> {
    let s = s.as_ref();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut current_style = Style::default();
    let mut chars = s.char_indices();

    while let Some((start, ch)) = chars.next() {
        if ch != ESCAPE_MARKER {
            run.push(ch);
            continue;
        }

        let mut end = s.len();
        for (i, c) in chars.by_ref() {
            if is_terminator(c) {
                end = i + c.len_utf8();
                break;
            }
        }

        if let Some(new_style) = parse_sgr_sequence(&s[start..end], current_style) {
            if new_style != current_style && !run.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut run), current_style));
            }
            current_style = new_style;
        }
    }

    if !run.is_empty() {
        spans.push(Span::styled(run, current_style));
    }
    Line::from(spans)
}

// Apply an SGR (Select Graphic Rendition) sequence to `current_style`
fn parse_sgr_sequence(s: &str, current_style: Style) -> Option<Style> {
    let params_str = s.strip_prefix("\x1b[")?.strip_suffix('m')?;

    // ESC[m is the same as ESC[0m
    let params: Vec<u16> = if params_str.is_empty() {
        vec![0]
    } else {
        params_str
            .split(';')
            .filter_map(|p| p.parse::<u16>().ok())
            .collect()
    };

    let mut new_style = current_style;

    let mut i = 0;
    while i < params.len() {
        match params[i] {
            0 => new_style = Style::default(),
            1 => new_style = new_style.add_modifier(Modifier::BOLD),
            2 => new_style = new_style.add_modifier(Modifier::DIM),
            3 => new_style = new_style.add_modifier(Modifier::ITALIC),
            4 => new_style = new_style.add_modifier(Modifier::UNDERLINED),
            5 => new_style = new_style.add_modifier(Modifier::SLOW_BLINK),
            6 => new_style = new_style.add_modifier(Modifier::RAPID_BLINK),
            7 => new_style = new_style.add_modifier(Modifier::REVERSED),
            8 => new_style = new_style.add_modifier(Modifier::HIDDEN),
            9 => new_style = new_style.add_modifier(Modifier::CROSSED_OUT),
            22 => new_style = new_style.remove_modifier(Modifier::BOLD | Modifier::DIM),
            23 => new_style = new_style.remove_modifier(Modifier::ITALIC),
            24 => new_style = new_style.remove_modifier(Modifier::UNDERLINED),
            27 => new_style = new_style.remove_modifier(Modifier::REVERSED),
            29 => new_style = new_style.remove_modifier(Modifier::CROSSED_OUT),

            30..=37 => new_style = new_style.fg(ansi_color(params[i] - 30)),
            39 => new_style = new_style.fg(Color::Reset),
            40..=47 => new_style = new_style.bg(ansi_color(params[i] - 40)),
            49 => new_style = new_style.bg(Color::Reset),
            90..=97 => new_style = new_style.fg(ansi_color(params[i] - 90 + 8)),
            100..=107 => new_style = new_style.bg(ansi_color(params[i] - 100 + 8)),

            38 | 48 => {
                let (color, consumed) = extended_color(&params[i + 1..]);
                if let Some(color) = color {
                    new_style = if params[i] == 38 {
                        new_style.fg(color)
                    } else {
                        new_style.bg(color)
                    };
                }
                i += consumed;
            }

            _ => {}
        }
        i += 1;
    }

    Some(new_style)
}

// `5;n` for the 256 palette, `2;r;g;b` for true color
fn extended_color(params: &[u16]) -> (Option<Color>, usize) {
    match params {
        [5, idx, ..] => (u8::try_from(*idx).ok().map(Color::Indexed), 2),
        [2, r, g, b, ..] => {
            let rgb = (u8::try_from(*r), u8::try_from(*g), u8::try_from(*b));
            match rgb {
                (Ok(r), Ok(g), Ok(b)) => (Some(Color::Rgb(r, g, b)), 4),
                _ => (None, 4),
            }
        }
        _ => (None, 0),
    }
}

/// The 16 base colors in SGR order (30-37, then 90-97).
pub(crate) const BASE_COLORS: [Color; 16] = [
    Color::Black,
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::Gray,
    Color::DarkGray,
    Color::LightRed,
    Color::LightGreen,
    Color::LightYellow,
    Color::LightBlue,
    Color::LightMagenta,
    Color::LightCyan,
    Color::White,
];

fn ansi_color(code: u16) -> Color {
    BASE_COLORS
        .get(code as usize)
        .copied()
        .unwrap_or(Color::Reset)
}
