//! Prompt-driven comparison of two sequences
//!
//! The session is a small state machine. Sequences come either from the
//! console or from two FASTA files; the unfiltered plot is written first,
//! after which the user may filter with new window and threshold values as
//! often as they like before finishing.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use seqdot_core::{sequence_from_text, FastaParser, FilterParams, Sequence, Session};
use seqdot_render::{DotPlotExporter, PlotLabels};

const INVALID_DATA: &str = "Invalid data.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMethod {
    Console,
    Fasta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    ChooseInputMethod,
    AwaitSequences(InputMethod),
    ShowPlot,
    ChooseNextAction,
    ApplyFilter,
    Done,
}

pub struct InteractiveDriver<R, W> {
    input: R,
    output: W,
    exporter: DotPlotExporter,
    raw_output: PathBuf,
    filtered_output: PathBuf,
    session: Option<Session>,
}

impl<R: BufRead, W: Write> InteractiveDriver<R, W> {
    pub fn new(
        input: R,
        output: W,
        exporter: DotPlotExporter,
        raw_output: PathBuf,
        filtered_output: PathBuf,
    ) -> Self {
        Self {
            input,
            output,
            exporter,
            raw_output,
            filtered_output,
            session: None,
        }
    }

    /// Run until the user finishes, input ends, or invalid data stops the session
    pub fn run(&mut self) -> Result<()> {
        let mut state = State::ChooseInputMethod;
        while state != State::Done {
            log::trace!("Interactive state: {:?}", state);
            state = self.step(state)?;
        }
        self.output.flush()?;
        Ok(())
    }

    /// Advance by one state
    pub fn step(&mut self, state: State) -> Result<State> {
        match state {
            State::ChooseInputMethod => self.choose_input_method(),
            State::AwaitSequences(method) => self.await_sequences(method),
            State::ShowPlot => self.show_plot(),
            State::ChooseNextAction => self.choose_next_action(),
            State::ApplyFilter => self.apply_filter(),
            State::Done => Ok(State::Done),
        }
    }

    fn choose_input_method(&mut self) -> Result<State> {
        let Some(answer) = self.prompt(
            "Choose input method:\n 1 - enter sequences in the console\n 2 - read FASTA files",
        )?
        else {
            return Ok(State::Done);
        };

        match answer.trim() {
            "1" => Ok(State::AwaitSequences(InputMethod::Console)),
            "2" => Ok(State::AwaitSequences(InputMethod::Fasta)),
            _ => {
                writeln!(self.output, "Please choose a valid number.")?;
                Ok(State::Done)
            }
        }
    }

    fn await_sequences(&mut self, method: InputMethod) -> Result<State> {
        let session = match method {
            InputMethod::Console => {
                let Some(seq1) = self.console_sequence("Enter the first DNA sequence:", "DNA 1")? else {
                    return Ok(State::Done);
                };
                let Some(seq2) = self.console_sequence("Enter the second DNA sequence:", "DNA 2")? else {
                    return Ok(State::Done);
                };
                Session::new(seq1, "DNA 1", seq2, "DNA 2")
            }
            InputMethod::Fasta => {
                let Some(file1) = self.prompt("Enter the name of the first file:")? else {
                    return Ok(State::Done);
                };
                let Some(file2) = self.prompt("Enter the name of the second file:")? else {
                    return Ok(State::Done);
                };
                let (file1, file2) = (file1.trim().to_string(), file2.trim().to_string());

                let Some(seq1) = self.fasta_sequence(&file1)? else {
                    return Ok(State::Done);
                };
                let Some(seq2) = self.fasta_sequence(&file2)? else {
                    return Ok(State::Done);
                };
                Session::new(seq1, file1, seq2, file2)
            }
        };

        log::info!(
            "Comparing {} ({} bp) with {} ({} bp)",
            session.name1(),
            session.seq1().len(),
            session.name2(),
            session.seq2().len()
        );
        self.session = Some(session);
        Ok(State::ShowPlot)
    }

    fn show_plot(&mut self) -> Result<State> {
        let Some(session) = self.session.as_ref() else {
            return Ok(State::Done);
        };

        let labels = PlotLabels::from_session(session, None);
        self.exporter.export(&self.raw_output, session.matrix()?, &labels)?;
        writeln!(self.output, "Dot plot saved to {}", self.raw_output.display())?;
        Ok(State::ChooseNextAction)
    }

    fn choose_next_action(&mut self) -> Result<State> {
        let Some(answer) = self.prompt(
            "Choose what to do next:\n 1 - change the window and threshold\n 2 - finish",
        )?
        else {
            return Ok(State::Done);
        };

        match answer.trim() {
            "1" => Ok(State::ApplyFilter),
            "2" => Ok(State::Done),
            _ => {
                writeln!(self.output, "{}", INVALID_DATA)?;
                Ok(State::Done)
            }
        }
    }

    fn apply_filter(&mut self) -> Result<State> {
        let Some(max) = self.session.as_ref().map(Session::max_parameter) else {
            return Ok(State::Done);
        };

        let Some(window) = self.parameter("Enter the window size:", max)? else {
            return Ok(State::ChooseNextAction);
        };
        let Some(threshold) = self.parameter("Enter the threshold:", max)? else {
            return Ok(State::ChooseNextAction);
        };

        let Some(session) = self.session.as_ref() else {
            return Ok(State::Done);
        };
        let params = FilterParams::new(window, threshold);
        let filtered = session.filtered(params)?;
        let labels = PlotLabels::from_session(session, Some(params));
        self.exporter.export(&self.filtered_output, &filtered, &labels)?;
        writeln!(
            self.output,
            "Filtered dot plot saved to {}",
            self.filtered_output.display()
        )?;
        Ok(State::ChooseNextAction)
    }

    /// Print `message` and read one line, `None` at end of input
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        writeln!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    fn console_sequence(&mut self, message: &str, name: &str) -> Result<Option<Sequence>> {
        let Some(text) = self.prompt(message)? else {
            return Ok(None);
        };
        match sequence_from_text(name, &text) {
            Ok(seq) => Ok(Some(seq)),
            Err(e) => {
                log::debug!("Rejected {}: {}", name, e);
                writeln!(self.output, "{}", INVALID_DATA)?;
                Ok(None)
            }
        }
    }

    fn fasta_sequence(&mut self, path: &str) -> Result<Option<Sequence>> {
        match FastaParser::read_sequence(path) {
            Ok(seq) => Ok(Some(seq)),
            Err(e) => {
                log::warn!("{:#}", e);
                writeln!(self.output, "{}", INVALID_DATA)?;
                Ok(None)
            }
        }
    }

    /// Read a value in `[1, max]`; anything else prints the invalid data notice
    fn parameter(&mut self, message: &str, max: usize) -> Result<Option<usize>> {
        let Some(text) = self.prompt(message)? else {
            return Ok(None);
        };
        match text.trim().parse::<usize>() {
            Ok(value) if (1..=max).contains(&value) => Ok(Some(value)),
            _ => {
                writeln!(self.output, "{}", INVALID_DATA)?;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use seqdot_render::ExportConfig;
    use tempfile::{tempdir, NamedTempFile, TempDir};

    struct Run {
        transcript: String,
        session_dims: Option<(usize, usize)>,
        session_names: Option<(String, String)>,
        dir: TempDir,
    }

    impl Run {
        fn raw(&self) -> PathBuf {
            self.dir.path().join(RenderConfig::default().raw_output)
        }

        fn filtered(&self) -> PathBuf {
            self.dir.path().join(RenderConfig::default().filtered_output)
        }
    }

    fn run(input: &str) -> Run {
        let dir = tempdir().unwrap();
        let render = RenderConfig::default();
        let mut out = Vec::new();
        let mut driver = InteractiveDriver::new(
            input.as_bytes(),
            &mut out,
            DotPlotExporter::new(render.export_config()),
            dir.path().join(&render.raw_output),
            dir.path().join(&render.filtered_output),
        );
        driver.run().unwrap();

        let session_dims = driver
            .session
            .as_ref()
            .map(|s| s.matrix().unwrap().dimensions());
        let session_names = driver
            .session
            .as_ref()
            .map(|s| (s.name1().to_string(), s.name2().to_string()));
        drop(driver);

        Run {
            transcript: String::from_utf8(out).unwrap(),
            session_dims,
            session_names,
            dir,
        }
    }

    #[test]
    fn test_console_session_with_filter() {
        let result = run("1\nATCG\nATGG\n1\n2\n1\n2\n");
        assert!(result.raw().exists());
        assert!(result.filtered().exists());
        assert!(result.transcript.contains("Dot plot saved to"));
        assert!(result.transcript.contains("Filtered dot plot saved to"));
        assert!(!result.transcript.contains(INVALID_DATA));
        assert_eq!(result.session_dims, Some((4, 4)));
        assert_eq!(
            result.session_names,
            Some(("DNA 1".to_string(), "DNA 2".to_string()))
        );
    }

    #[test]
    fn test_default_outputs_show_names_and_parameters() {
        let result = run("1\nATCG\nATGG\n1\n3\n2\n2\n");

        let raw = std::fs::read_to_string(result.raw()).unwrap();
        assert!(raw.contains("Comparison of DNA 1 and DNA 2"));
        assert!(raw.contains("Unfiltered"));

        let filtered = std::fs::read_to_string(result.filtered()).unwrap();
        assert!(filtered.contains("Comparison of DNA 1 and DNA 2"));
        assert!(filtered.contains("Window: 3, threshold: 2"));
        // Both sequences are short enough for one tick per symbol
        assert_eq!(filtered.matches("class=\"tick\"").count(), 8);
    }

    #[test]
    fn test_invalid_symbol_stops_session() {
        let result = run("1\nATXG\nATCG\n");
        assert!(result.transcript.contains(INVALID_DATA));
        // The second sequence is never requested
        assert!(!result.transcript.contains("second DNA sequence"));
        assert!(!result.raw().exists());
        assert!(result.session_dims.is_none());
    }

    #[test]
    fn test_console_input_is_case_sensitive() {
        let result = run("1\natcg\n");
        assert!(result.transcript.contains(INVALID_DATA));
        assert!(result.session_dims.is_none());
    }

    #[test]
    fn test_unknown_method() {
        let result = run("3\n");
        assert!(result.transcript.contains("Please choose a valid number."));
        assert!(result.session_dims.is_none());
    }

    #[test]
    fn test_out_of_range_window_returns_to_menu() {
        // window 5 exceeds min(3, 3); the user then finishes
        let result = run("1\nACG\nACG\n1\n5\n2\n");
        assert!(result.raw().exists());
        assert!(!result.filtered().exists());
        assert_eq!(result.transcript.matches(INVALID_DATA).count(), 1);
        assert_eq!(result.transcript.matches("Choose what to do next").count(), 2);
    }

    #[test]
    fn test_zero_threshold_is_rejected() {
        let result = run("1\nACG\nACG\n1\n2\n0\n2\n");
        assert!(!result.filtered().exists());
        assert!(result.transcript.contains(INVALID_DATA));
    }

    #[test]
    fn test_repeated_filtering() {
        let result = run("1\nACGT\nACGT\n1\n2\n1\n1\n4\n4\n2\n");
        assert_eq!(result.transcript.matches("Filtered dot plot saved").count(), 2);
        assert!(result.filtered().exists());
    }

    #[test]
    fn test_end_of_input_finishes_quietly() {
        let result = run("");
        assert!(result.transcript.starts_with("Choose input method:"));
        assert!(!result.transcript.contains(INVALID_DATA));

        let result = run("1\nACGT\nACGT\n");
        assert!(result.raw().exists());
        assert!(!result.transcript.contains(INVALID_DATA));
    }

    #[test]
    fn test_fasta_session_uses_file_names() {
        let mut f1 = NamedTempFile::new().unwrap();
        writeln!(f1, ">a\nTTTT\n>b\nACGTAC").unwrap();
        let mut f2 = NamedTempFile::new().unwrap();
        writeln!(f2, ">c\nacgt").unwrap();
        let p1 = f1.path().display().to_string();
        let p2 = f2.path().display().to_string();

        let result = run(&format!("2\n{}\n{}\n2\n", p1, p2));
        assert!(result.raw().exists());
        assert_eq!(result.session_dims, Some((4, 6)));
        assert_eq!(result.session_names, Some((p1, p2)));
    }

    #[test]
    fn test_missing_fasta_file() {
        let result = run("2\n/nonexistent/one.fa\n/nonexistent/two.fa\n");
        assert!(result.transcript.contains(INVALID_DATA));
        assert!(!result.raw().exists());
    }

    #[test]
    fn test_step_transitions() {
        let mut out = Vec::new();
        let mut driver = InteractiveDriver::new(
            "2\n".as_bytes(),
            &mut out,
            DotPlotExporter::new(ExportConfig::default()),
            PathBuf::from("unused.png"),
            PathBuf::from("unused2.png"),
        );
        assert_eq!(driver.step(State::ChooseNextAction).unwrap(), State::Done);
        assert_eq!(driver.step(State::Done).unwrap(), State::Done);
        // Nothing to plot without a session
        assert_eq!(driver.step(State::ShowPlot).unwrap(), State::Done);
    }
}
