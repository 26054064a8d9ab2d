/// Binary invoked when `NIXSTATE_NIX` is not set.
pub const DEFAULT_NIX_PROGRAM: &str = "nix";

/// Flags prepended to every subcommand so that flake lock files are never touched.
pub const LOCK_FILE_FLAGS: [&str; 2] = ["--no-update-lock-file", "--no-write-lock-file"];

/// Environment variable read by Nix's SSH store transport.
pub const SSH_OPTS_ENV: &str = "NIX_SSHOPTS";

/// Name of the output selected first when a derivation has several.
pub const DEFAULT_OUTPUT: &str = "out";

/// Fragment of `nix copy --offline` stderr meaning the path is absent from the store.
pub const MISSING_SUBSTITUTER_MARKER: &str = "no substituter that can build it";

/// Fragment of `nix path-info` stderr meaning the store has no such valid path.
pub const INVALID_PATH_MARKER: &str = "is not valid";
