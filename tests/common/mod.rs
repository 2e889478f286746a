#![allow(dead_code)]
use std::{
    fs,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
};

/// Writes just enough of the GNU `.mo` layout for the catalog parser: header,
/// the two string tables and the strings, no hash table.
pub struct MoBuilder {
    entries: Vec<(String, String)>,
}

impl MoBuilder {
    pub fn new() -> Self {
        MoBuilder {
            entries: vec![(
                String::new(),
                "Content-Type: text/plain; charset=UTF-8\n".to_string(),
            )],
        }
    }

    pub fn message(mut self, id: &str, translation: &str) -> Self {
        self.entries.push((id.to_string(), translation.to_string()));
        self
    }

    pub fn plural(self, id: &str, plural: &str, forms: &[&str]) -> Self {
        self.message(&format!("{id}\0{plural}"), &forms.join("\0"))
    }

    pub fn context(self, context: &str, id: &str, translation: &str) -> Self {
        self.message(&format!("{context}\x04{id}"), translation)
    }

    pub fn context_plural(self, context: &str, id: &str, plural: &str, forms: &[&str]) -> Self {
        self.plural(&format!("{context}\x04{id}"), plural, forms)
    }

    pub fn build(&self) -> Vec<u8> {
        const HEADER_LEN: usize = 28;
        let count = self.entries.len();
        let originals_offset = HEADER_LEN;
        let translations_offset = originals_offset + 8 * count;
        let data_offset = translations_offset + 8 * count;

        let mut data = Vec::new();
        let mut table = |text: &str| {
            let entry = (text.len() as u32, (data_offset + data.len()) as u32);
            data.extend_from_slice(text.as_bytes());
            data.push(0);
            entry
        };
        let originals: Vec<_> = self.entries.iter().map(|(id, _)| table(id)).collect();
        let translations: Vec<_> = self.entries.iter().map(|(_, tr)| table(tr)).collect();

        let mut out = Vec::new();
        for word in [
            0x950412de,
            0,
            count as u32,
            originals_offset as u32,
            translations_offset as u32,
            0,
            data_offset as u32,
        ] {
            out.extend_from_slice(&u32::to_le_bytes(word));
        }
        for (len, offset) in originals.into_iter().chain(translations) {
            out.extend_from_slice(&len.to_le_bytes());
            out.extend_from_slice(&offset.to_le_bytes());
        }
        out.extend_from_slice(&data);
        out
    }

    /// Store as `<dir>/<language>/LC_MESSAGES/<domain>.mo`.
    pub fn install(&self, dir: &Path, language: &str, domain: &str) -> PathBuf {
        let messages = dir.join(language).join("LC_MESSAGES");
        fs::create_dir_all(&messages).unwrap();
        let path = messages.join(format!("{domain}.mo"));
        fs::write(&path, self.build()).unwrap();
        path
    }
}

/// A fresh, empty directory unique to this test process and `name`.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "konversation-scripting-tests-{}-{name}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn write_script(path: &Path, body: &str) -> PathBuf {
    fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    path.to_path_buf()
}

/// A bus client stand-in that appends its arguments, `|`-terminated, as one
/// line to `<script>.log` and exits with `status`.
pub fn recording_bus_client(dir: &Path, status: i32) -> PathBuf {
    write_script(
        &dir.join("qdbus"),
        &format!(
            "for arg in \"$@\"; do printf '%s|' \"$arg\"; done >> \"$0.log\"\n\
             echo >> \"$0.log\"\n\
             exit {status}"
        ),
    )
}

pub fn recorded_calls(bus_client: &Path) -> Vec<String> {
    let log = bus_client.with_extension("log");
    match fs::read_to_string(log) {
        Ok(text) => text.lines().map(str::to_string).collect(),
        Err(_) => Vec::new(),
    }
}

/// A locale directory helper stand-in printing `dirs` joined by `:`.
pub fn printing_qtpaths(dir: &Path, dirs: &[&Path]) -> PathBuf {
    let joined = dirs
        .iter()
        .map(|d| d.display().to_string())
        .collect::<Vec<_>>()
        .join(":");
    write_script(&dir.join("qtpaths"), &format!("printf '%s\\n' '{joined}'"))
}

pub fn failing_qtpaths(dir: &Path) -> PathBuf {
    write_script(&dir.join("qtpaths"), "exit 1")
}
