use assert_cmd::Command;
use std::path::Path;

pub fn simplenotes_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("simplenotes").unwrap();
    cmd.env("SIMPLENOTES_HOME", home);
    cmd.env_remove("SIMPLENOTES_LOG");
    cmd
}
