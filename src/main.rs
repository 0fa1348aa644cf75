use std::{
    fs,
    io::{stdout, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use freqtag::{
    dataset::{self, InstanceFormat},
    task, Config, Error, Evaluation, LogFormat, Result, SelectionRule,
};

/// Label text from counted co-occurrence statistics: train once, label once.
#[derive(Debug, Parser)]
#[command(version)]
struct Argv {
    /// raise the log level (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    /// read settings from a JSON file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// pick the label with the smallest or the largest log-score
    #[arg(long, global = true, value_enum)]
    select: Option<SelectionRule>,
    /// layout of the diagnostic log
    #[arg(long, global = true, value_enum, default_value = "text")]
    log_format: LogFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Part-of-speech tag a test file using a word/tag training file
    Tag {
        /// training corpus of word/tag tokens
        train: PathBuf,
        /// words to tag
        test: PathBuf,
        /// where to write the tagged words
        #[arg(short, long, default_value = "pos-test-with-tags.txt")]
        output: PathBuf,
        /// also write a diagnostic log
        #[arg(long, value_name = "FILE")]
        log: Option<PathBuf>,
    },
    /// Disambiguate the sense of the head word of each test instance
    Wsd(ClassifyArgs),
    /// Classify the sentiment of each test message
    Sentiment(ClassifyArgs),
    /// Compare predictions against a key and report accuracy
    Score {
        /// predicted tags or answers
        prediction: PathBuf,
        /// gold-standard tags or answers
        key: PathBuf,
        #[arg(long, value_enum, default_value = "tags")]
        format: ScoreFormat,
        /// write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct ClassifyArgs {
    /// labeled instance corpus
    train: PathBuf,
    /// unlabeled instance corpus
    test: PathBuf,
    /// diagnostic log file
    #[arg(default_value = "my-model.txt")]
    log: PathBuf,
    /// write answers here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScoreFormat {
    /// word/tag tokens
    Tags,
    /// <answer instance=".." senseid|sentiment=".."/> lines
    Answers,
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content).map_err(|e| Error::Io { path: path.to_path_buf(), source: e })?;
            log::info!("wrote {}", path.display());
        }
        None => {
            let mut out = stdout().lock();
            writeln!(out, "{content}")?;
        }
    }
    Ok(())
}

fn classify(argv: &Argv, config: &Config, args: &ClassifyArgs, format: InstanceFormat) -> Result<()> {
    let train = dataset::read_file(&args.train)?;
    let test = dataset::read_file(&args.test)?;
    let run = task::classify_corpus(&train, &test, format, &config.classifier)?;
    run.log().save(&args.log, argv.log_format)?;
    write_output(args.output.as_deref(), &run.output())
}

fn score(prediction: &Path, key: &Path, format: ScoreFormat) -> Result<Evaluation> {
    let prediction = dataset::read_file(prediction)?;
    let key = dataset::read_file(key)?;
    let (predicted, reference): (Vec<String>, Vec<String>) = match format {
        ScoreFormat::Tags => (
            dataset::read_tagged_tokens(&prediction).into_iter().map(|t| t.tag).collect(),
            dataset::read_tagged_tokens(&key).into_iter().map(|t| t.tag).collect(),
        ),
        ScoreFormat::Answers => {
            let predicted = dataset::read_answers(&prediction);
            let reference = dataset::read_answers(&key);
            for ((p, _), (r, _)) in predicted.iter().zip(&reference) {
                if p != r {
                    log::warn!("instance id mismatch: predicted {p}, key {r}");
                }
            }
            (
                predicted.into_iter().map(|(_, l)| l).collect(),
                reference.into_iter().map(|(_, l)| l).collect(),
            )
        }
    };
    let mut evaluation = Evaluation::default();
    evaluation.accumulate(reference.as_slice(), predicted.as_slice())?;
    evaluation.evaluate();
    Ok(evaluation)
}

fn run(argv: &Argv) -> Result<()> {
    let mut config = match &argv.config {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };
    if let Some(rule) = argv.select {
        config.classifier.selection = rule;
    }
    match &argv.command {
        Command::Tag { train, test, output, log } => {
            let train = dataset::read_file(train)?;
            let test = dataset::read_file(test)?;
            let run = task::tag_corpus(&train, &test, &config.tagger)?;
            if let Some(path) = log {
                run.log().save(path, argv.log_format)?;
            }
            write_output(Some(output.as_path()), &run.output())?;
            println!("Success! Open {:?} to view the tagged test data.", output);
            Ok(())
        }
        Command::Wsd(args) => classify(argv, &config, args, InstanceFormat::Wsd),
        Command::Sentiment(args) => classify(argv, &config, args, InstanceFormat::Sentiment),
        Command::Score { prediction, key, format, output } => {
            let evaluation = score(prediction, key, *format)?;
            write_output(output.as_deref(), &evaluation.to_string())
        }
    }
}

fn main() -> ExitCode {
    let argv = Argv::parse();
    let level = match argv.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    log::debug!("{:?}", argv);
    match run(&argv) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
