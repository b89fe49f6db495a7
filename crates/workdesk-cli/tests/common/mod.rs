#![allow(clippy::unwrap_used)]

use std::path::Path;
use std::time::Duration;

use assert_cmd::Command;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// Create a `workdesk` command isolated to `dir`.
///
/// The cache lives in `dir/cache` and the config path points at a file that
/// does not exist, so defaults apply regardless of the host setup.
#[allow(dead_code)]
pub fn workdesk_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("workdesk"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env("WORKDESK_CACHE_DIR", dir.join("cache"));
    cmd.env("WORKDESK_CONFIG", dir.join("config.toml"));
    cmd.env_remove("WORKDESK_NOTES_URL");
    cmd.env_remove("WORKDESK_OUTPUT_FORMAT");
    cmd.env("NOTION_TOKEN", "secret_test");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Like [`workdesk_cmd`] but talking to a mock notes server.
#[allow(dead_code)]
pub fn workdesk_cmd_for(dir: &Path, server_uri: &str) -> Command {
    let mut cmd = workdesk_cmd(dir);
    cmd.env("WORKDESK_NOTES_URL", format!("{server_uri}/v1"));
    cmd
}
