use crate::config::LogoConfig;

/// Which logo artwork the label is paired with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetVariant {
    /// Two-line artwork (taller, same width).
    Long,
    /// One-line artwork.
    Short,
}

/// Why the label was broken onto two lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakSource {
    /// The user typed the delimiter.
    Delimiter,
    /// The label exceeded the length threshold.
    Length,
}

/// Placement recipe for the logo label, consumed once when the logo is instantiated.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LogoLayoutPlan {
    /// Artwork to pair with the label.
    pub asset_variant: AssetVariant,
    /// Uppercased label, with at most one `\n`.
    pub display_text: String,
    /// Horizontal squeeze for the text box, in `(0, 1]`.
    pub text_width_scale: f64,
    /// Label top offset as a fraction of the logo's rendered *width*.
    pub vertical_offset_ratio: f64,
    /// `None` for single-line labels.
    pub break_source: Option<BreakSource>,
}

impl LogoLayoutPlan {
    /// Display lines, top to bottom.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.display_text.split('\n')
    }

    /// One or two.
    pub fn line_count(&self) -> usize {
        self.lines().count()
    }

    /// Top of the label text box for a logo placed at `logo_top` and rendered
    /// `logo_rendered_width` pixels wide.
    ///
    /// Both artwork variants share a width but not a height, so anchoring to the width keeps
    /// the label baseline in the same spot whichever variant is shown.
    pub fn text_top(&self, logo_top: f64, logo_rendered_width: f64) -> f64 {
        logo_top + self.vertical_offset_ratio * logo_rendered_width
    }
}

/// Turns free-form label text into a [`LogoLayoutPlan`].
///
/// An explicit delimiter always wins over length-based breaking. Length-based breaking
/// splits at the last space of the label, not at the space nearest the middle.
#[derive(Clone, Debug, Default)]
pub struct LogoLayoutPlanner {
    config: LogoConfig,
}

impl LogoLayoutPlanner {
    /// Planner with custom thresholds.
    pub fn new(config: LogoConfig) -> Self {
        Self { config }
    }

    /// Plan the label. Never fails; an empty label yields an empty single line.
    #[tracing::instrument(skip(self))]
    pub fn plan(&self, label: &str) -> LogoLayoutPlan {
        // Typed line breaks and tabs are not break requests; only the delimiter is.
        let text = collapse_spaces(&label.to_uppercase());

        let (lines, break_source) = match self.split_on_delimiter(&text) {
            DelimiterSplit::Lines(first, second) => {
                (Lines::Two(first, second), Some(BreakSource::Delimiter))
            }
            DelimiterSplit::Remaining(rest) => self.split_on_length(rest),
            DelimiterSplit::Absent => self.split_on_length(text),
        };

        let text_width_scale = self.width_scale(&lines);
        let (asset_variant, display_text) = match lines {
            Lines::One(line) => (AssetVariant::Short, line),
            Lines::Two(first, second) => (AssetVariant::Long, format!("{first}\n{second}")),
        };

        tracing::debug!(?asset_variant, ?break_source, text_width_scale, "logo layout planned");
        LogoLayoutPlan {
            asset_variant,
            display_text,
            text_width_scale,
            vertical_offset_ratio: self.config.vertical_offset_ratio,
            break_source,
        }
    }

    fn split_on_delimiter(&self, text: &str) -> DelimiterSplit {
        let delim = self.config.delimiter;
        let Some((head, tail)) = text.split_once(delim) else {
            return DelimiterSplit::Absent;
        };

        let head = collapse_spaces(head);
        let tail = collapse_spaces(&tail.replace(delim, " "));
        match (head.is_empty(), tail.is_empty()) {
            (false, false) => DelimiterSplit::Lines(head, tail),
            (false, true) => DelimiterSplit::Remaining(head),
            (true, _) => DelimiterSplit::Remaining(tail),
        }
    }

    fn split_on_length(&self, text: String) -> (Lines, Option<BreakSource>) {
        if char_len(&text) <= self.config.length_threshold {
            return (Lines::One(text), None);
        }
        match text.rsplit_once(' ') {
            Some((head, tail)) => (
                Lines::Two(head.to_owned(), tail.to_owned()),
                Some(BreakSource::Length),
            ),
            None => (Lines::One(text), None),
        }
    }

    fn width_scale(&self, lines: &Lines) -> f64 {
        let threshold = self.config.length_threshold as f64;
        let longest = match lines {
            Lines::One(line) => {
                let len = char_len(line);
                if len <= self.config.length_threshold {
                    return 1.0;
                }
                len
            }
            Lines::Two(first, second) => {
                let break_at = char_len(first) as f64;
                let total = (char_len(first) + 1 + char_len(second)) as f64;
                if (break_at - total * 0.5).abs() <= self.config.balance_window as f64 {
                    return 1.0;
                }
                char_len(first).max(char_len(second))
            }
        };
        if longest == 0 {
            return 1.0;
        }
        (threshold / longest as f64).clamp(self.config.min_text_width_scale, 1.0)
    }
}

/// [`LogoLayoutPlanner::plan`] with an explicit configuration.
pub fn plan_logo_layout(label: &str, config: &LogoConfig) -> LogoLayoutPlan {
    LogoLayoutPlanner::new(config.clone()).plan(label)
}

enum Lines {
    One(String),
    Two(String, String),
}

enum DelimiterSplit {
    Absent,
    Lines(String, String),
    Remaining(String),
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn collapse_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "../../tests/unit/logo/layout.rs"]
mod tests;
