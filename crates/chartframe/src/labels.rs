// File: crates/chartframe/src/labels.rs
// Summary: Axis tick generation for numeric and calendar axes.

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Timelike};

use crate::text::TextMeasure;

const MS_PER_DAY: f64 = 86_400_000.0;

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// One tick: its axis value and display text.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub value: f64,
    pub text: String,
}

/// Ticks for one axis plus the pixel width of the widest label (unit included),
/// used to size the axis column before drawing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelSet {
    pub widest: f32,
    pub labels: Vec<Label>,
}

impl LabelSet {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// [`make_labels_with`] using [`format_label_value`].
pub fn make_labels(
    measure: &impl TextMeasure,
    screen_w: f64,
    min: f64,
    max: f64,
    spacing_guess: f64,
    step: f64,
    unit: &str,
) -> LabelSet {
    make_labels_with(measure, screen_w, min, max, spacing_guess, step, unit, format_label_value)
}

/// Ticks for `[min, max)` spaced roughly `spacing_guess` pixels apart on an
/// axis `screen_w` pixels long. The tick increment is a multiple of `step`.
#[allow(clippy::too_many_arguments)]
pub fn make_labels_with(
    measure: &impl TextMeasure,
    screen_w: f64,
    min: f64,
    max: f64,
    spacing_guess: f64,
    step: f64,
    unit: &str,
    fmt: impl Fn(f64) -> String,
) -> LabelSet {
    let n = screen_w / spacing_guess;
    let diff = max - min;
    if !(n >= 1.0) || !(diff > 0.0) || !(step > 0.0) || !step.is_finite() {
        return LabelSet::default();
    }
    let tick_guess = diff / n;
    // next multiple of step above the guess
    let tick = tick_guess + step - (tick_guess % step);
    let abs_max = max.abs().max(min.abs());
    // enough digits to see the change between ticks, plus two for the tick itself
    let sig_figs = (abs_max / tick).log10().round() as i32 + 2;

    let mut labels = Vec::new();
    let mut widest = 0f32;
    let mut x = (min / tick).ceil() * tick;
    while x < max {
        x = to_precision(x, sig_figs);
        let text = fmt(x);
        widest = widest.max(measure.measure(&text));
        labels.push(Label { value: x, text });
        let next = x + tick;
        if next <= x {
            tracing::warn!(x, tick, "tick increment below float resolution");
            break;
        }
        x = next;
    }
    widest = widest.max(measure.measure(unit));
    tracing::debug!(count = labels.len(), tick, widest, "generated axis labels");
    LabelSet { widest, labels }
}

/// Round `x` to `sig` significant figures (clamped to 1..=17).
pub fn to_precision(x: f64, sig: i32) -> f64 {
    if x == 0.0 || !x.is_finite() {
        return x;
    }
    let sig = sig.clamp(1, 17);
    let mag = x.abs().log10().floor() as i32;
    let p = sig - 1 - mag;
    if p > 300 {
        return x;
    }
    if p >= 0 {
        let f = 10f64.powi(p);
        (x * f).round() / f
    } else {
        let f = 10f64.powi(-p);
        (x / f).round() * f
    }
}

/// Nearest multiple of `w`.
pub fn step_round(v: f64, w: f64) -> f64 {
    (v / w).round() * w
}

/// Four to five significant digits with thousands separators, e.g. `1,234.5`,
/// `0.5000`, `123,460`.
pub fn format_label_value(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    let rounded = to_precision(v, 5);
    if rounded == 0.0 {
        return "0.000".to_string();
    }
    let mag = rounded.abs().log10().floor() as i32;
    let max_dec = (4 - mag).max(0) as usize;
    let min_dec = (3 - mag).max(0) as usize;
    let mut digits = format!("{:.*}", max_dec, rounded.abs());
    if max_dec > min_dec && digits.ends_with('0') {
        digits.pop();
        if digits.ends_with('.') {
            digits.pop();
        }
    }
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (digits, None),
    };
    let mut out = String::new();
    if rounded < 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(&int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(&frac);
    }
    out
}

fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Calendar ticks for epoch-millisecond values in the local time zone.
pub fn make_date_labels(start_ms: f64, end_ms: f64, min_tick_ms: f64, screen_w: f64, spacing_guess: f64) -> Vec<Label> {
    make_date_labels_in(&Local, start_ms, end_ms, min_tick_ms, screen_w, spacing_guess)
}

/// Calendar ticks in `tz`. The increment is the multiple of `min_tick_ms`
/// nearest the ideal spacing. Dates only appear when they change from the
/// previous tick, so ticks are generated in order.
pub fn make_date_labels_in<Tz: TimeZone>(
    tz: &Tz,
    start_ms: f64,
    end_ms: f64,
    min_tick_ms: f64,
    screen_w: f64,
    spacing_guess: f64,
) -> Vec<Label> {
    let diff = end_ms - start_ms;
    let n = (screen_w / spacing_guess).max(2.0);
    let tick = step_round(diff / n, min_tick_ms);
    if tick == 0.0 {
        tracing::error!(min_tick_ms, diff, n, "zero tick for date labels");
        return Vec::new();
    }
    if !(tick > 0.0) {
        return Vec::new();
    }

    let at = |ms: f64| -> Option<DateTime<Tz>> { tz.timestamp_millis_opt(ms as i64).single() };
    let day_of = |ms: f64| -> Option<NaiveDate> { at(ms).map(|d| d.date_naive()) };

    let sub_day = min_tick_ms < MS_PER_DAY;
    let mut last_day = day_of(start_ms);
    if last_day == day_of(end_ms) {
        // force a date stamp on the first tick
        last_day = None;
    }
    let mut last_year: Option<i32> = None;

    let mut out = Vec::new();
    let mut x = start_ms;
    while x <= end_ms {
        let Some(d) = at(x) else {
            tracing::warn!(ms = x, "timestamp out of range for date label");
            break;
        };
        let month = MONTHS[d.month0() as usize];
        let day = d.date_naive();
        let text = if sub_day {
            if Some(day) != last_day {
                format!("{}{} {}:{:02}", month, d.day(), d.hour(), d.minute())
            } else {
                format!("{}:{:02}", d.hour(), d.minute())
            }
        } else if Some(d.year()) != last_year {
            format!("{}{} '{:02}", month, d.day(), d.year().rem_euclid(100))
        } else {
            format!("{}{}", month, d.day())
        };
        out.push(Label { value: x, text });
        last_day = Some(day);
        last_year = Some(d.year());
        x += tick;
    }
    out
}
