//! Integration tests for the pyactr pipeline.
//!
//! Tests validate:
//! - Successful runs return the full, unfiltered output
//! - Failed runs surface the banner-stripped output as an error, whichever
//!   stream the banner was written to
//! - Caller-supplied goal overrides the model's goal initializer
//! - Initial buffer reference and parse errors
//! - Call-order errors (no model, unnamed model)
//! - Script retention and removal, including a removal that fails
//! - Runtime probing during initialize

use std::cell::RefCell;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use actr_compiler::artifact::sha256_hex;
use actr_compiler::{
    CommandOutput, CommandRunner, CompilerError, Framework, FrameworkConfig, InitialBuffers,
    PyActr,
};
use actr_parser::parse_chunk;
use actr_types::model::{
    Chunk, ClearStatement, Initializer, Match, MatchTarget, Model, Production, Statement,
};
use actr_types::ErrorCode;

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

const BANNER: &str = "/opt/pyactr/simulation.py:89: UserWarning: Simulation GUI is set to False.\n  warnings.warn(\"Simulation GUI is set to False.\")\n";

/// Answers probe commands itself and returns `script_output` for anything
/// else, recording each call and the script text seen at run time.
#[derive(Clone)]
struct MockRunner {
    script_output: CommandOutput,
    import_ok: bool,
    calls: Rc<RefCell<Vec<Vec<String>>>>,
    seen_script: Rc<RefCell<Option<String>>>,
}

impl MockRunner {
    fn new(text: &str, success: bool) -> Self {
        Self {
            script_output: CommandOutput {
                text: text.to_string(),
                success,
                code: Some(if success { 0 } else { 1 }),
            },
            import_ok: true,
            calls: Rc::new(RefCell::new(Vec::new())),
            seen_script: Rc::new(RefCell::new(None)),
        }
    }

    fn script_runs(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.len() == 2 && call[1].ends_with(".py"))
            .count()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, program: &str, args: &[&OsStr]) -> io::Result<CommandOutput> {
        let mut call = vec![program.to_string()];
        call.extend(args.iter().map(|a| a.to_string_lossy().into_owned()));
        self.calls.borrow_mut().push(call);

        match args.first().and_then(|a| a.to_str()) {
            Some("--version") => Ok(CommandOutput {
                text: "Python 3.12.1\n".into(),
                success: true,
                code: Some(0),
            }),
            Some("-c") => Ok(CommandOutput {
                text: String::new(),
                success: self.import_ok,
                code: Some(if self.import_ok { 0 } else { 1 }),
            }),
            Some(path) => {
                *self.seen_script.borrow_mut() = Some(fs::read_to_string(path)?);
                Ok(self.script_output.clone())
            }
            None => Err(io::Error::new(io::ErrorKind::InvalidInput, "no arguments")),
        }
    }
}

/// Runs a fixed shell command in place of the generated script, through the
/// real process runner.
#[cfg(unix)]
struct ShellRunner(&'static str);

#[cfg(unix)]
impl CommandRunner for ShellRunner {
    fn run(&self, _program: &str, _args: &[&OsStr]) -> io::Result<CommandOutput> {
        actr_compiler::SystemCommandRunner.run("sh", &[OsStr::new("-c"), OsStr::new(self.0)])
    }
}

/// Swaps the script for a directory of the same name, so it cannot be
/// removed as a file, then reports a failed run.
struct ScriptBecomesDirectory;

impl CommandRunner for ScriptBecomesDirectory {
    fn run(&self, _program: &str, args: &[&OsStr]) -> io::Result<CommandOutput> {
        let path = PathBuf::from(args[0]);
        fs::remove_file(&path)?;
        fs::create_dir(&path)?;
        Ok(CommandOutput {
            text: "boom\n".into(),
            success: false,
            code: Some(1),
        })
    }
}

/// Fresh scratch directory for one test.
fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("actr-pipeline-{}-{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn config(dir: PathBuf) -> FrameworkConfig {
    FrameworkConfig {
        tmp_path: dir,
        ..FrameworkConfig::default()
    }
}

fn count_model() -> Model {
    let mut model = Model::new("count");
    model
        .chunks
        .push(Arc::new(Chunk::new("count", ["first", "second"])));
    model
        .chunks
        .push(Arc::new(Chunk::new("countFrom", ["start", "end", "count"])));

    let goal = parse_chunk(&model, "[countFrom: 0 2 starting]").unwrap().unwrap();
    model.initializers.push(Initializer {
        buffer: Some("goal".into()),
        pattern: goal,
    });

    let done = parse_chunk(&model, "[countFrom: ?x ?x ?]").unwrap().unwrap();
    model.productions.push(Production {
        name: "stop".into(),
        description: None,
        matches: vec![Match {
            target: MatchTarget::Buffer("goal".into()),
            pattern: done,
        }],
        statements: vec![Statement::Clear(ClearStatement {
            buffer_names: vec!["goal".into()],
        })],
    });
    model
}

fn framework(name: &str, runner: MockRunner) -> PyActr<MockRunner> {
    let mut fw = PyActr::with_runner(config(scratch(name)), runner);
    fw.set_model(count_model()).unwrap();
    fw
}

fn buffers(entries: &[(&str, &str)]) -> InitialBuffers {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ══════════════════════════════════════════════════════════════════════════════
// Running
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn successful_run_returns_full_output() {
    let text = format!("{BANNER}final goal: countFrom(count= counting, end= 2, start= 2)\n");
    let runner = MockRunner::new(&text, true);
    let mut fw = framework("success", runner.clone());

    let out = fw.run(&InitialBuffers::new()).unwrap();

    assert_eq!(out.output, text);
    assert_eq!(out.script_path, fw.config().tmp_path.join("pyactr_Count.py"));
    assert!(out.generated_code.contains("pyactr_Count = actr.ACTRModel(subsymbolic=True)"));
    assert_eq!(out.script_sha256, sha256_hex(&out.generated_code));
    assert_eq!(
        runner.calls.borrow().last().unwrap(),
        &vec![
            "python3".to_string(),
            out.script_path.to_string_lossy().into_owned()
        ]
    );
}

#[test]
fn failed_run_strips_gui_banner() {
    let runner = MockRunner::new(&format!("{BANNER}ERROR: foo\n"), false);
    let mut fw = framework("failure-banner", runner);

    let err = fw.run(&InitialBuffers::new()).unwrap_err();
    match &err {
        CompilerError::Execution { output } => assert_eq!(output, "ERROR: foo"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.to_string(), "ERROR: foo");
}

#[cfg(unix)]
#[test]
fn failed_run_keeps_stdout_written_after_stderr_banner() {
    let script = r#"echo '/opt/pyactr/simulation.py:89: UserWarning: Simulation GUI is set to False.' 1>&2
echo '  warnings.warn("Simulation GUI is set to False.")' 1>&2
echo 'ERROR: foo'
exit 1"#;
    let mut fw = PyActr::with_runner(config(scratch("failure-streams")), ShellRunner(script));
    fw.set_model(count_model()).unwrap();

    let err = fw.run(&InitialBuffers::new()).unwrap_err();
    match err {
        CompilerError::Execution { output } => assert_eq!(output, "ERROR: foo"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn failed_run_without_banner_is_verbatim() {
    let text = "Traceback (most recent call last):\nNameError: name 'x' is not defined\n";
    let mut fw = framework("failure-plain", MockRunner::new(text, false));

    let err = fw.run(&InitialBuffers::new()).unwrap_err();
    assert!(matches!(err, CompilerError::Execution { ref output } if output == text));
}

#[test]
fn script_seen_by_interpreter_matches_generated_code() {
    let runner = MockRunner::new("", true);
    let mut fw = framework("seen", runner.clone());

    let out = fw.run(&InitialBuffers::new()).unwrap();
    assert_eq!(runner.seen_script.borrow().as_deref(), Some(out.generated_code.as_str()));
}

// ══════════════════════════════════════════════════════════════════════════════
// Initial buffers
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn initial_goal_overrides_model_goal() {
    let mut fw = framework("goal-override", MockRunner::new("", true));

    let out = fw
        .run(&buffers(&[("goal", "[countFrom: 2 5 starting]")]))
        .unwrap();

    let code = &out.generated_code;
    assert!(code.contains("initial_goal = actr.chunkstring(string='''"));
    assert!(code.contains("\tstart\t2\n\tend\t5\n"));
    assert!(code.contains("goal.add(initial_goal)"));
    assert!(!code.contains("goal.add(actr.chunkstring"));
}

#[test]
fn model_goal_used_without_initial_goal() {
    let mut fw = framework("goal-model", MockRunner::new("", true));

    let out = fw.run(&InitialBuffers::new()).unwrap();

    assert!(!out.generated_code.contains("initial_goal"));
    assert!(out.generated_code.contains("goal.add(actr.chunkstring(string='''"));
}

#[test]
fn empty_goal_text_is_ignored() {
    let mut fw = framework("goal-empty", MockRunner::new("", true));

    let out = fw.run(&buffers(&[("goal", "  ")])).unwrap();
    assert!(!out.generated_code.contains("initial_goal"));
}

#[test]
fn other_initial_buffers_are_accepted_but_not_emitted() {
    let mut fw = framework("retrieval", MockRunner::new("", true));

    let out = fw.run(&buffers(&[("retrieval", "[count: 7 8]")])).unwrap();
    assert!(!out.generated_code.contains("\tfirst\t7"));
}

#[test]
fn unknown_initial_buffer_stops_before_running() {
    let runner = MockRunner::new("", true);
    let mut fw = framework("unknown-buffer", runner.clone());

    let err = fw.run(&buffers(&[("visual", "[count: 1 2]")])).unwrap_err();

    assert_eq!(
        err.to_string(),
        "cannot initialize buffer 'visual' - not found in model 'count'"
    );
    assert_eq!(runner.script_runs(), 0);
    assert!(!fw.config().tmp_path.join("pyactr_Count.py").exists());
}

#[test]
fn malformed_initial_buffer_carries_parse_error() {
    let runner = MockRunner::new("", true);
    let mut fw = framework("bad-buffer", runner.clone());

    let err = fw.run(&buffers(&[("goal", "[nope: 1]")])).unwrap_err();

    match err {
        CompilerError::InitialBuffer { buffer, source } => {
            assert_eq!(buffer, "goal");
            assert_eq!(source.code, ErrorCode::UNKNOWN_CHUNK);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(runner.script_runs(), 0);
}

// ══════════════════════════════════════════════════════════════════════════════
// Model lifecycle
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn run_without_model() {
    let mut fw = PyActr::with_runner(config(scratch("no-model")), MockRunner::new("", true));
    let err = fw.run(&InitialBuffers::new()).unwrap_err();
    assert!(matches!(err, CompilerError::ModelNotSet));
}

#[test]
fn unnamed_model_rejected() {
    let mut fw = PyActr::with_runner(config(scratch("unnamed")), MockRunner::new("", true));
    let err = fw.set_model(Model::new("")).unwrap_err();
    assert!(matches!(err, CompilerError::MissingModelName));
    assert!(fw.model().is_none());
}

#[test]
fn set_model_derives_class_name() {
    let fw = framework("class-name", MockRunner::new("", true));
    assert_eq!(fw.name(), "pyactr");
    assert_eq!(fw.class_name(), "pyactr_Count");
}

#[test]
fn write_model_uses_given_directory() {
    let fw = framework("write-model", MockRunner::new("", true));
    let dir = scratch("write-model-out");

    let path = fw.write_model(&dir, &InitialBuffers::new()).unwrap();

    assert_eq!(path, dir.join("pyactr_Count.py"));
    let script = fs::read_to_string(&path).unwrap();
    assert!(script.starts_with("# This file is generated by actr-compiler "));
    assert!(script.contains("pyactr_Count.productionstring(name='stop', string='''"));
}

// ══════════════════════════════════════════════════════════════════════════════
// Script retention
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn generated_script_kept_by_default() {
    let mut fw = framework("keep", MockRunner::new("", true));

    let out = fw.run(&InitialBuffers::new()).unwrap();
    assert_eq!(fs::read_to_string(&out.script_path).unwrap(), out.generated_code);
}

#[test]
fn generated_script_removed_when_not_kept() {
    let runner = MockRunner::new("", true);
    let mut fw = PyActr::with_runner(
        FrameworkConfig {
            keep_generated: false,
            ..config(scratch("discard"))
        },
        runner.clone(),
    );
    fw.set_model(count_model()).unwrap();

    let out = fw.run(&InitialBuffers::new()).unwrap();

    assert!(runner.seen_script.borrow().is_some());
    assert!(!out.script_path.exists());
}

#[test]
fn generated_script_removed_after_failed_run() {
    let mut fw = PyActr::with_runner(
        FrameworkConfig {
            keep_generated: false,
            ..config(scratch("discard-failed"))
        },
        MockRunner::new("boom", false),
    );
    fw.set_model(count_model()).unwrap();

    assert!(fw.run(&InitialBuffers::new()).is_err());
    assert!(!fw.config().tmp_path.join("pyactr_Count.py").exists());
}

#[test]
fn failed_cleanup_does_not_hide_run_result() {
    let mut fw = PyActr::with_runner(
        FrameworkConfig {
            keep_generated: false,
            ..config(scratch("discard-stuck"))
        },
        ScriptBecomesDirectory,
    );
    fw.set_model(count_model()).unwrap();

    let err = fw.run(&InitialBuffers::new()).unwrap_err();
    match err {
        CompilerError::Execution { output } => assert_eq!(output, "boom\n"),
        other => panic!("unexpected error: {other}"),
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Initialize
// ══════════════════════════════════════════════════════════════════════════════

#[cfg(unix)]
#[test]
fn initialize_probes_and_creates_tmp_dir() {
    let tmp = scratch("init").join("nested");
    let runner = MockRunner::new("", true);
    let mut fw = PyActr::with_runner(
        FrameworkConfig {
            interpreter: "sh".into(),
            ..config(tmp.clone())
        },
        runner.clone(),
    );

    let identity = fw.initialize().unwrap();

    assert_eq!(identity.version, "Python 3.12.1");
    assert!(identity.path.ends_with("sh"));
    assert!(tmp.is_dir());
    assert_eq!(
        runner.calls.borrow()[1],
        vec!["sh".to_string(), "-c".to_string(), "import pyactr".to_string()]
    );
}

#[cfg(unix)]
#[test]
fn initialize_fails_without_package() {
    let mut runner = MockRunner::new("", true);
    runner.import_ok = false;
    let mut fw = PyActr::with_runner(
        FrameworkConfig {
            interpreter: "sh".into(),
            ..config(scratch("init-no-package"))
        },
        runner,
    );

    let err = fw.initialize().unwrap_err();
    assert!(err.to_string().starts_with("python package 'pyactr' not found"));
}

#[test]
fn initialize_fails_without_interpreter() {
    let mut fw = PyActr::with_runner(
        FrameworkConfig {
            interpreter: "definitely-not-python-4711".into(),
            ..config(scratch("init-no-exe"))
        },
        MockRunner::new("", true),
    );

    let err = fw.initialize().unwrap_err();
    assert!(matches!(err, CompilerError::ExecutableNotFound(ref exe) if exe == "definitely-not-python-4711"));
}
