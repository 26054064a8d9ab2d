//! Installable helpers.

/// Installable for an attribute of a NixOS configuration exposed by a flake.
///
/// The configuration name is quoted as a Nix string so names containing dots stay
/// one attribute. Commands are spawned without a shell, so no shell quoting is added.
///
/// ```
/// use nixstate_lib::installable::flake_nixos_configuration;
///
/// assert_eq!(
///   flake_nixos_configuration(".", "web-1", "system.build.toplevel"),
///   r#".#nixosConfigurations."web-1".config.system.build.toplevel"#,
/// );
/// ```
pub fn flake_nixos_configuration(flake: &str, configuration: &str, attribute: &str) -> String {
  format!(
    "{flake}#nixosConfigurations.{}.config.{attribute}",
    nix_string(configuration)
  )
}

/// Double-quoted Nix string literal. `$` is escaped so `${` never interpolates.
fn nix_string(value: &str) -> String {
  let mut quoted = String::with_capacity(value.len() + 2);
  quoted.push('"');
  for c in value.chars() {
    match c {
      '"' | '\\' | '$' => {
        quoted.push('\\');
        quoted.push(c);
      }
      '\n' => quoted.push_str("\\n"),
      '\r' => quoted.push_str("\\r"),
      '\t' => quoted.push_str("\\t"),
      c => quoted.push(c),
    }
  }
  quoted.push('"');
  quoted
}
