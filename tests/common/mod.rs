use assert_cmd::Command;
use std::path::Path;

pub fn payman_cmd() -> Command {
    let mut cmd = Command::cargo_bin("payman").unwrap();
    cmd.env_remove("PAYMAN_CONFIG");
    cmd.env_remove("PAYMAN_DATA");
    cmd
}

/// Command running inside `dir`, where `payman init` has been run
#[allow(dead_code)]
pub fn payman_in(dir: &Path) -> Command {
    let mut cmd = payman_cmd();
    cmd.current_dir(dir);
    cmd
}
