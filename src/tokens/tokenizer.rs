//! First stage of cell interpretation: turning the text of a cell into an
//! ordered sequence of tokens by ordered alternation. At each position the
//! first pattern (in declaration order) that matches wins.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Column names a table header cell may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeaderKind {
    Batch,
    Channel,
    ColumnId,
    Contents,
    ControlType,
    Control,
    DnaReactionConcentration,
    ExperimentId,
    ExperimentStatus,
    FileType,
    LabId,
    LastUpdated,
    MeasurementType,
    Notes,
    NumNegControls,
    Ods,
    Path,
    Parameter,
    Value,
    PipelineStatus,
    Replicate,
    RnaInhibitor,
    RowId,
    Samples,
    State,
    Strains,
    TemplateDna,
    Temperature,
    Timepoint,
    Unknown,
}

impl HeaderKind {
    pub fn name(&self) -> &'static str {
        match self {
            HeaderKind::Batch => "batch",
            HeaderKind::Channel => "channel",
            HeaderKind::ColumnId => "column-id",
            HeaderKind::Contents => "contents",
            HeaderKind::ControlType => "control-type",
            HeaderKind::Control => "control",
            HeaderKind::DnaReactionConcentration => "dna-reaction-concentration",
            HeaderKind::ExperimentId => "experiment-id",
            HeaderKind::ExperimentStatus => "experiment-status",
            HeaderKind::FileType => "file-type",
            HeaderKind::LabId => "lab-id",
            HeaderKind::LastUpdated => "last-updated",
            HeaderKind::MeasurementType => "measurement-type",
            HeaderKind::Notes => "notes",
            HeaderKind::NumNegControls => "number-of-negative-controls",
            HeaderKind::Ods => "ods",
            HeaderKind::Path => "path",
            HeaderKind::Parameter => "parameter",
            HeaderKind::Value => "value",
            HeaderKind::PipelineStatus => "pipeline-status",
            HeaderKind::Replicate => "replicate",
            HeaderKind::RnaInhibitor => "rna-inhibitor",
            HeaderKind::RowId => "row-id",
            HeaderKind::Samples => "samples",
            HeaderKind::State => "state",
            HeaderKind::Strains => "strains",
            HeaderKind::TemplateDna => "template-dna",
            HeaderKind::Temperature => "temperature",
            HeaderKind::Timepoint => "timepoint",
            HeaderKind::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    BooleanTrue,
    BooleanFalse,
    Date,
    Time,
    Number,
    Name,
    Keyword,
    Separator,
    Skip,
    Header(HeaderKind),
}

impl TokenKind {
    /// The kind as it appears in the serialized form the pattern matcher
    /// reads. Header column names all count as keywords there.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::BooleanTrue => "BOOLEAN_TRUE",
            TokenKind::BooleanFalse => "BOOLEAN_FALSE",
            TokenKind::Date => "DATE",
            TokenKind::Time => "TIME",
            TokenKind::Number => "NUMBER",
            TokenKind::Name => "NAME",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Separator => "SEPARATOR",
            TokenKind::Skip => "SKIP",
            TokenKind::Header(_) => "KEYWORD",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Token {
        Token {
            kind,
            value: value.into(),
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "«{},{}»", self.kind.name(), self.value)
    }
}

const NUMBER: &str = r"-?\d+(?:\.\d*)?(?:[eE][-+]?\d+)?";
const SKIP: &str = r"[ \t\x0B]+";
const HEADER_GAP: &str = r"[ \t\n\x0B_\-]*";

/// An ordered set of token patterns compiled into one alternation.
pub struct Tokenizer {
    kinds: Vec<TokenKind>,
    regex: Regex,
}

impl Tokenizer {
    fn new(specification: &[(TokenKind, String)]) -> Tokenizer {
        let pattern = specification
            .iter()
            .enumerate()
            .map(|(i, (_, pattern))| format!("(?P<t{}>{})", i, pattern))
            .collect::<Vec<_>>()
            .join("|");

        Tokenizer {
            kinds: specification
                .iter()
                .map(|(kind, _)| *kind)
                .collect(),
            regex: Regex::new(&pattern).unwrap_or_else(|e| panic!("{}", e)),
        }
    }

    /// Tokens for generic cell content.
    pub fn cell() -> &'static Tokenizer {
        static TOKENIZER: OnceLock<Tokenizer> = OnceLock::new();
        TOKENIZER.get_or_init(|| {
            Tokenizer::new(&[
                (TokenKind::BooleanTrue, r"(?i:true)\b".to_string()),
                (TokenKind::BooleanFalse, r"(?i:false)\b".to_string()),
                (TokenKind::Date, r"\d{4}[-/]\d{1,2}[-/]\d{1,2}\b".to_string()),
                (TokenKind::Time, r"\d{1,2}:\d{2}:\d{2}\b".to_string()),
                (TokenKind::Number, NUMBER.to_string()),
                (TokenKind::Name, r"[^\t\x0B \d,:@][^ \t\x0B,@]*".to_string()),
                (TokenKind::Skip, SKIP.to_string()),
                (TokenKind::Separator, r"[,@]".to_string()),
            ])
        })
    }

    /// Tokens for the rows of a lab table, where `:` separates key and value.
    pub fn lab() -> &'static Tokenizer {
        static TOKENIZER: OnceLock<Tokenizer> = OnceLock::new();
        TOKENIZER.get_or_init(|| {
            Tokenizer::new(&[
                (TokenKind::Keyword, r"(?i:lab)".to_string()),
                (TokenKind::Number, NUMBER.to_string()),
                (TokenKind::Name, r"[^\t\x0B \d,:][^ \t\x0B,:]*".to_string()),
                (TokenKind::Skip, SKIP.to_string()),
                (TokenKind::Separator, r"[,:]".to_string()),
            ])
        })
    }

    /// Tokens for table captions of the form `Table 3`.
    pub fn caption() -> &'static Tokenizer {
        static TOKENIZER: OnceLock<Tokenizer> = OnceLock::new();
        TOKENIZER.get_or_init(|| {
            Tokenizer::new(&[
                (TokenKind::Keyword, r"(?i:table)".to_string()),
                (TokenKind::Number, NUMBER.to_string()),
                (TokenKind::Name, r"[^\t\x0B \d,:][^ \t\x0B,]*".to_string()),
                (TokenKind::Skip, SKIP.to_string()),
                (TokenKind::Separator, r"[,]".to_string()),
            ])
        })
    }

    /// Tokens for experiment ids, `experiment.<lab>.<id>`.
    pub fn experiment_id() -> &'static Tokenizer {
        static TOKENIZER: OnceLock<Tokenizer> = OnceLock::new();
        TOKENIZER.get_or_init(|| {
            Tokenizer::new(&[
                (TokenKind::Keyword, r"[Ee]xperiment".to_string()),
                (TokenKind::Name, r"[^\t\x0B \n.]+".to_string()),
                (TokenKind::Skip, SKIP.to_string()),
                (TokenKind::Separator, r"[.]".to_string()),
            ])
        })
    }

    /// Tokens for table header cells. Matching is case-insensitive and
    /// multi-word names tolerate whitespace and hyphens between the words.
    pub fn header() -> &'static Tokenizer {
        static TOKENIZER: OnceLock<Tokenizer> = OnceLock::new();
        TOKENIZER.get_or_init(|| {
            let words = |words: &[&str]| -> String {
                format!(
                    r"(?i:{})\b",
                    words.join(HEADER_GAP)
                )
            };
            Tokenizer::new(&[
                (TokenKind::Header(HeaderKind::Batch), words(&["batch"])),
                (TokenKind::Header(HeaderKind::Channel), words(&["channel"])),
                (TokenKind::Header(HeaderKind::ColumnId), words(&["column", "id"])),
                (TokenKind::Header(HeaderKind::Contents), words(&["contents"])),
                (TokenKind::Header(HeaderKind::ControlType), words(&["control", "type"])),
                (TokenKind::Header(HeaderKind::Control), words(&["controls?"])),
                (
                    TokenKind::Header(HeaderKind::DnaReactionConcentration),
                    words(&["dna", "reaction", "concentration"]),
                ),
                (TokenKind::Header(HeaderKind::ExperimentId), words(&["experiment", "id"])),
                (TokenKind::Header(HeaderKind::ExperimentStatus), words(&["experiment", "status"])),
                (TokenKind::Header(HeaderKind::FileType), words(&["file", "types?"])),
                (TokenKind::Header(HeaderKind::LabId), words(&["lab", "id"])),
                (TokenKind::Header(HeaderKind::LastUpdated), words(&["last", "updated?"])),
                (TokenKind::Header(HeaderKind::MeasurementType), words(&["measurement", "type"])),
                (TokenKind::Header(HeaderKind::Notes), words(&["notes"])),
                (
                    TokenKind::Header(HeaderKind::NumNegControls),
                    words(&["number", "of", "negative", "controls"]),
                ),
                (TokenKind::Header(HeaderKind::Ods), words(&["ods"])),
                (TokenKind::Header(HeaderKind::Path), words(&["output", "from", "pipeline"])),
                (TokenKind::Header(HeaderKind::Path), words(&["path"])),
                (TokenKind::Header(HeaderKind::Parameter), words(&["parameter"])),
                (TokenKind::Header(HeaderKind::Value), words(&["value"])),
                (TokenKind::Header(HeaderKind::PipelineStatus), words(&["pipeline", "status"])),
                (TokenKind::Header(HeaderKind::Replicate), words(&["replicates?"])),
                (
                    TokenKind::Header(HeaderKind::RnaInhibitor),
                    words(&["use", "rnase", "inhibitor", "in", "reaction"]),
                ),
                (TokenKind::Header(HeaderKind::RowId), words(&["row", "id"])),
                (TokenKind::Header(HeaderKind::Samples), words(&["samples"])),
                (TokenKind::Skip, r"[ \t\n\x0B]+".to_string()),
                (TokenKind::Header(HeaderKind::State), words(&["processed"])),
                (TokenKind::Header(HeaderKind::State), words(&["state"])),
                (TokenKind::Header(HeaderKind::Strains), words(&["strains?"])),
                (TokenKind::Header(HeaderKind::TemplateDna), words(&["template", "dna"])),
                (TokenKind::Header(HeaderKind::Temperature), words(&["temperatures?"])),
                (TokenKind::Header(HeaderKind::Timepoint), words(&["timepoints?"])),
                (TokenKind::Header(HeaderKind::Unknown), r".+".to_string()),
            ])
        })
    }

    /// Split text into tokens. Whitespace (`SKIP`) and separator tokens can
    /// be dropped from the result. Input no pattern matches is passed over.
    pub fn tokenize(&self, text: &str, keep_skip: bool, keep_separator: bool) -> Vec<Token> {
        let mut tokens = Vec::new();

        for captures in self
            .regex
            .captures_iter(text)
        {
            let found = self
                .kinds
                .iter()
                .enumerate()
                .find_map(|(i, kind)| {
                    captures
                        .get(i + 1)
                        .map(|m| (*kind, m.as_str()))
                });

            let Some((kind, value)) = found else {
                continue;
            };

            match kind {
                TokenKind::Skip if !keep_skip => continue,
                TokenKind::Separator if !keep_separator => continue,
                _ => {}
            }

            tokens.push(Token::new(kind, value.replace('\u{000B}', "")));
        }

        tokens
    }

    /// Tokens with whitespace and separators both kept.
    pub fn tokenize_all(&self, text: &str) -> Vec<Token> {
        self.tokenize(text, true, true)
    }
}
