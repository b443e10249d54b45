// tokio-marquee/src/widgets/marquee/container_style.rs
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::border;

use super::{BASE_COLORS, RESET_SEQUENCE, printable_width};

/// Styling applied around a rendered marquee body.
///
/// The body already measures exactly the marquee width and ends with a reset,
/// so implementations only decorate it.
pub trait ContainerStyle: Send + Sync {
    fn apply(&self, body: &str) -> String;
}

impl<F> ContainerStyle for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn apply(&self, body: &str) -> String {
        self(body)
    }
}

/// Leaves the body untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStyle;

impl ContainerStyle for PlainStyle {
    fn apply(&self, body: &str) -> String {
        body.to_string()
    }
}

/// Prefixes the body with the SGR encoding of a ratatui [`Style`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SgrStyle(pub Style);

impl ContainerStyle for SgrStyle {
    fn apply(&self, body: &str) -> String {
        let open = sgr_sequence(self.0);
        if open.is_empty() {
            return body.to_string();
        }
        format!("{open}{body}{RESET_SEQUENCE}")
    }
}

/// Draws a box around the body, optionally tinting the body and the frame.
#[derive(Debug, Clone, Copy)]
pub struct BorderStyle {
    pub set: border::Set,
    pub border: Style,
    pub inner: Style,
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self {
            set: border::PLAIN,
            border: Style::default(),
            inner: Style::default(),
        }
    }
}

impl BorderStyle {
    pub fn new(set: border::Set) -> Self {
        Self {
            set,
            ..Self::default()
        }
    }

    pub fn border_style(mut self, style: Style) -> Self {
        self.border = style;
        self
    }

    pub fn inner_style(mut self, style: Style) -> Self {
        self.inner = style;
        self
    }

    fn paint(&self, text: &str) -> String {
        SgrStyle(self.border).apply(text)
    }
}

impl ContainerStyle for BorderStyle {
    fn apply(&self, body: &str) -> String {
        let width = printable_width(body);
        let set = &self.set;

        let top = format!(
            "{}{}{}",
            set.top_left,
            set.horizontal_top.repeat(width),
            set.top_right
        );
        let bottom = format!(
            "{}{}{}",
            set.bottom_left,
            set.horizontal_bottom.repeat(width),
            set.bottom_right
        );

        [
            self.paint(&top),
            format!(
                "{}{}{}",
                self.paint(set.vertical_left),
                SgrStyle(self.inner).apply(body),
                self.paint(set.vertical_right)
            ),
            self.paint(&bottom),
        ]
        .join("\n")
    }
}

/// Encode `style` as a single SGR sequence, or nothing for the default style.
pub fn sgr_sequence(style: Style) -> String {
    let mut params: Vec<String> = Vec::new();

    const MODIFIERS: [(Modifier, u8); 9] = [
        (Modifier::BOLD, 1),
        (Modifier::DIM, 2),
        (Modifier::ITALIC, 3),
        (Modifier::UNDERLINED, 4),
        (Modifier::SLOW_BLINK, 5),
        (Modifier::RAPID_BLINK, 6),
        (Modifier::REVERSED, 7),
        (Modifier::HIDDEN, 8),
        (Modifier::CROSSED_OUT, 9),
    ];
    for (modifier, code) in MODIFIERS {
        if style.add_modifier.contains(modifier) {
            params.push(code.to_string());
        }
    }

    if let Some(fg) = style.fg {
        params.push(color_param(fg, 30));
    }
    if let Some(bg) = style.bg {
        params.push(color_param(bg, 40));
    }

    if params.is_empty() {
        return String::new();
    }
    format!("\x1b[{}m", params.join(";"))
}

// `base` is 30 for foreground and 40 for background
fn color_param(color: Color, base: u16) -> String {
    match color {
        Color::Reset => (base + 9).to_string(),
        Color::Indexed(idx) => format!("{};5;{idx}", base + 8),
        Color::Rgb(r, g, b) => format!("{};2;{r};{g};{b}", base + 8),
        named => {
            let pos = BASE_COLORS
                .iter()
                .position(|c| *c == named)
                .unwrap_or_default() as u16;
            if pos < 8 {
                (base + pos).to_string()
            } else {
                (base + 60 + pos - 8).to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_style_is_identity() {
        assert_eq!(PlainStyle.apply("abc"), "abc");
    }

    #[test]
    fn closures_are_styles() {
        let style = |body: &str| format!("[{body}]");
        assert_eq!(style.apply("x"), "[x]");
    }

    #[test]
    fn sgr_encodes_colors_and_modifiers() {
        let style = Style::default()
            .fg(Color::Indexed(205))
            .bg(Color::LightBlue)
            .add_modifier(Modifier::BOLD);
        assert_eq!(sgr_sequence(style), "\x1b[1;38;5;205;104m");
        assert_eq!(
            sgr_sequence(Style::default().fg(Color::Rgb(1, 2, 3))),
            "\x1b[38;2;1;2;3m"
        );
        assert_eq!(sgr_sequence(Style::default().fg(Color::Red)), "\x1b[31m");
        assert_eq!(sgr_sequence(Style::default()), "");
    }

    #[test]
    fn sgr_style_wraps_the_body() {
        let style = SgrStyle(Style::default().fg(Color::Green));
        assert_eq!(style.apply("hi"), "\x1b[32mhi\x1b[0m");
        assert_eq!(SgrStyle::default().apply("hi"), "hi");
    }

    #[test]
    fn border_wraps_body_width() {
        let framed = BorderStyle::default().apply("ab\x1b[0m");
        assert_eq!(framed, "┌──┐\n│ab\x1b[0m│\n└──┘");
    }

    #[test]
    fn border_only_for_empty_body() {
        let framed = BorderStyle::new(border::DOUBLE).apply("");
        assert_eq!(framed, "╔╗\n║║\n╚╝");
    }

    #[test]
    fn border_lines_share_a_width() {
        let framed = BorderStyle::new(border::THICK)
            .border_style(Style::default().fg(Color::Magenta))
            .apply("你好 \x1b[0m");
        let widths: Vec<usize> = framed.lines().map(printable_width).collect();
        assert_eq!(widths, vec![7, 7, 7]);
    }
}
