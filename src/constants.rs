// src/constants.rs

/// The release identifier printed by `--version`.
pub const RELEASE: &str = env!("CARGO_PKG_VERSION");

/// Option definitions understood by the command line, in help-output order.
pub const COMMAND_OPTIONS: &[&str] = &[
    "-h, --help       :  print help message and exit",
    "-v, --version    :  print release version and exit",
    "-B               :  not append '-boilerpl8' to github repo name",
];

/// Key under which the `-B` flag is stored in the parsed options.
pub const NO_SUFFIX_FLAG: &str = "B";

/// Appended to GitHub repository names unless `-B` is given.
pub const BOILERPLATE_SUFFIX: &str = "-boilerpl8";

/// Root of the GitHub REST API.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Archive extensions accepted by the extractor. Longest suffixes first.
pub const SUPPORTED_ARCHIVE_EXTENSIONS: &[&str] =
    &[".tar.bz2", ".tar.gz", ".tar.xz", ".tgz", ".zip"];

/// Initializer scripts and their interpreters, in priority order.
/// Only the first one present in the extracted directory is run.
pub const INITIALIZER_SCRIPTS: &[(&str, &str)] = &[
    ("__init.rb", "ruby"),
    ("__init.py", "python"),
    ("__init.js", "node"),
    ("__init.pl", "perl"),
    ("__init.php", "php"),
    ("__init.lua", "lua"),
    ("__init.exs", "elixir"),
    ("__init.sh", "bash"),
];
