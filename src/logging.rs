//! Colored progress output of the parameter search.
use colored::Colorize;

use std::fmt;


const WIDTH: usize = 8;
const PREC_WIDTH: usize = 5;
const FULL_WIDTH: usize = 60;
const STAT_WIDTH: usize = (FULL_WIDTH - 4) / 2;


/// The outcome of one window size of the sweep.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WindowReport {
    pub(crate) normalize: bool,
    pub(crate) window_size: usize,
    pub(crate) word_length: usize,
    pub(crate) accuracy: f64,
    pub(crate) admitted: bool,
    pub(crate) ensemble_size: usize,
}


/// Print the settings of a search.
pub(crate) fn print_stats(
    name: &str,
    info: Option<Vec<(&str, String)>>,
    time_limit: u128,
)
{
    let limit = if time_limit != u128::MAX {
        time_format(time_limit)
    } else {
        "Nothing".into()
    };
    let header = format!(
        "{:=>FULL_WIDTH$}\n{:^FULL_WIDTH$}\n{:->FULL_WIDTH$}",
        "", "STATS".bold(), "",
    );
    println!(
        "\n{header}\n\
        + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}",
        "Search".bold(),
        name.bold().green(),
    );

    if let Some(info) = info {
        let line = info.into_iter()
            .map(|(key, val)| {
                format!(
                    "    + {:<STAT_WIDTH$}\t{:>width$}",
                    key,
                    val.bold().yellow(),
                    width = STAT_WIDTH - 8
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        println!("{line}");
    }
    println!(
        "\
        + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}\n\
        {:=^FULL_WIDTH$}\n\
        ",
        "Time Limit".bold(),
        limit.bold().green(),
        "".bold(),
    );
}


pub(crate) fn print_log_header() {
    println!(
        "      {:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}",
        "".bold().red(),
        "WINDOW".bold().blue(),
        "WORD".bold().green(),
        "LOOCV".bold().yellow(),
        "ENSEMBLE".bold().magenta(),
        "ACC.".bold().cyan(),
    );
    println!(
        "      {:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\n",
        "NORM".bold().red(),
        "SIZE".bold().blue(),
        "LENGTH".bold().green(),
        "ACC.".bold().yellow(),
        "SIZE".bold().magenta(),
        "TIME".bold().cyan(),
    );
}


/// Print one line per evaluated window size.
/// Admitted configurations are tagged `[ADD]`, the others `[LOG]`.
pub(crate) fn print_window(report: &WindowReport, time_acc: u128) {
    let tag = if report.admitted {
        "[ADD]".bold().bright_green()
    } else {
        "[LOG]".bold().magenta()
    };
    println!(
        "{} {}\t{}\t{}\t{}\t{}\t{}",
        tag,
        format!("{:>WIDTH$}", report.normalize).red(),
        format!("{:>WIDTH$}", report.window_size).blue(),
        format!("{:>WIDTH$}", report.word_length).green(),
        format!("{:>WIDTH$.PREC_WIDTH$}", report.accuracy).yellow(),
        format!("{:>WIDTH$}", report.ensemble_size).magenta(),
        time_format(time_acc).bold().cyan(),
    );
}


/// Print the line that closes the search.
/// `timed_out` tells whether the time limit stopped the sweep.
pub(crate) fn print_finish(
    timed_out: bool,
    ensemble_size: usize,
    train_accuracy: f64,
    time_acc: u128,
)
{
    let tag = if timed_out {
        "[TLE]".bold().bright_red()
    } else {
        "[FIN]".bold().bright_green()
    };
    println!(
        "{} {}\t{}\t{}\n",
        tag,
        format!("{:>WIDTH$}", ensemble_size).bold().magenta(),
        format!("{:>WIDTH$.PREC_WIDTH$}", train_accuracy).bold().yellow(),
        time_format(time_acc).bold().cyan(),
    );
}


/// Report a recoverable failure on stderr.
pub(crate) fn warn<T: fmt::Display>(message: T) {
    eprintln!("{} {message}", "[WARN]".bold().yellow());
}


pub(crate) fn time_format(millisec: u128) -> String {
    if millisec < 1_000 {
        return format!("  0.{:0>3}s", millisec);
    }
    let sec = millisec / 1_000;
    let millisec = millisec % 1_000;
    if sec < 60 {
        return format!(" {:0>2}.{:0>3}s", sec, millisec);
    }
    let min = sec / 60;
    let sec = sec % 60;
    if min < 60 {
        return format!(" {:0>2}m {:0>2}s", min, sec);
    }
    let hours = min / 60;
    let min = min % 60;
    format!(" {:0>2}h {:0>2}m", hours, min)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_format_units() {
        assert_eq!(time_format(42), "  0.042s");
        assert_eq!(time_format(12_345), " 12.345s");
        assert_eq!(time_format(125_000), " 02m 05s");
        assert_eq!(time_format(3_720_000), " 01h 02m");
    }
}
