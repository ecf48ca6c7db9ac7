use std::{io::Write as _, path::Path, path::PathBuf};

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    path
}

fn bin_path() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_playscope")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "playscope.exe"
            } else {
                "playscope"
            });
            p
        })
}

fn fixture(dir: &Path) -> (PathBuf, PathBuf, PathBuf) {
    let header = "game_id,play_id,frame_id,display_name,player_role,player_side,x,y";
    let input = write_file(
        dir,
        "input.csv",
        &format!(
            "{header}\n\
             1,10,1,Chase,Targeted Receiver,Offense,50,20\n\
             1,10,1,Hilton,Defensive Coverage,Defense,50,25\n\
             1,10,2,Chase,Targeted Receiver,Offense,52,20\n"
        ),
    );
    let output = write_file(dir, "output.csv", &format!("{header}\n"));
    let supp = write_file(
        dir,
        "supp.csv",
        "game_id,play_id,route_of_targeted_receiver,pass_result\n1,10,slant,C\n",
    );
    (input, output, supp)
}

#[test]
fn cli_frame_writes_png() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();
    let (input, output, supp) = fixture(&dir);

    let out_path = dir.join("frame0.png");
    let _ = std::fs::remove_file(&out_path);

    let status = std::process::Command::new(bin_path())
        .args(["frame", "--game", "1", "--play", "10", "--frame", "0"])
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--supp")
        .arg(&supp)
        .arg("--out")
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(status.success());
    assert!(out_path.exists());
}

#[test]
fn cli_export_rejects_an_unknown_game() {
    let dir = PathBuf::from("target").join("cli_smoke_export");
    std::fs::create_dir_all(&dir).unwrap();
    let (input, output, supp) = fixture(&dir);

    let out = std::process::Command::new(bin_path())
        .args(["export", "--game", "404", "--play", "10"])
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--supp")
        .arg(&supp)
        .arg("--out")
        .arg(&dir)
        .output()
        .unwrap();

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("no game 404"), "stderr: {stderr}");
}

#[test]
fn cli_list_emits_json() {
    let dir = PathBuf::from("target").join("cli_smoke_list");
    std::fs::create_dir_all(&dir).unwrap();
    let (input, output, supp) = fixture(&dir);

    let out = std::process::Command::new(bin_path())
        .args(["list", "--json"])
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--supp")
        .arg(&supp)
        .output()
        .unwrap();

    assert!(out.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let plays = parsed.as_array().unwrap();
    assert_eq!(plays.len(), 1);
    assert_eq!(plays[0]["play_id"], "10");
    assert_eq!(plays[0]["description"], "slant");
    assert_eq!(plays[0]["frames"], 2);
}
