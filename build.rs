use std::path::Path;

// Return the first existing path given a list of paths as string slices
fn get_first_path(paths: &[&'static str]) -> Option<&'static str> {
    paths.iter().find(|p| Path::new(p).exists()).copied()
}

fn main() {
    let dbus_bin: &str = get_first_path(&[
        "/usr/lib/qt6/bin/qdbus",
        "/usr/lib64/qt6/bin/qdbus",
        "/usr/bin/qdbus6",
    ])
    .unwrap_or("qdbus");

    let qtpaths_bin: &str = get_first_path(&[
        "/usr/lib/qt6/bin/qtpaths",
        "/usr/lib64/qt6/bin/qtpaths",
        "/usr/bin/qtpaths6",
    ])
    .unwrap_or("qtpaths6");

    println!("cargo:rustc-env=KONVERSATION_DBUS_BIN_DEFAULT={dbus_bin}");
    println!("cargo:rustc-env=KONVERSATION_QTPATHS_BIN_DEFAULT={qtpaths_bin}");
    println!("cargo:rerun-if-changed=build.rs");
}
