use std::{
    fs::File,
    io::{BufReader, ErrorKind},
    path::{Path, PathBuf},
};

use gettext::Catalog;

use super::locale::{catalog_path, language_candidates};
use crate::common::Error;
use crate::log::dev_debug;

pub(super) struct LoadedCatalog {
    pub catalog: Catalog,
    pub path: PathBuf,
    pub language: String,
}

/// The catalog for `domain` below a single directory. A missing catalog is an
/// error; another language is never substituted.
pub(super) fn load_from_dir(
    dir: &Path,
    domain: &str,
    language: &str,
) -> Result<LoadedCatalog, Error> {
    for candidate in language_candidates(language) {
        let path = catalog_path(dir, &candidate, domain);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => continue,
            Err(e) => return Err(Error::Io(path, e)),
        };

        let catalog = Catalog::parse(BufReader::new(file)).map_err(|e| Error::Catalog {
            path: path.clone(),
            message: e.to_string(),
        })?;

        return Ok(LoadedCatalog {
            catalog,
            path,
            language: candidate,
        });
    }

    Err(Error::CatalogNotFound {
        domain: domain.to_string(),
        dir: dir.to_path_buf(),
    })
}

/// Try `dirs` in order and keep the first catalog that loads.
pub(super) fn find_catalog(
    dirs: &[PathBuf],
    domain: &str,
    language: &str,
) -> Option<LoadedCatalog> {
    dirs.iter().find_map(|dir| match load_from_dir(dir, domain, language) {
        Ok(loaded) => {
            dev_debug!("using catalog {}", loaded.path.display());
            Some(loaded)
        }
        Err(error) => {
            dev_debug!("{error}");
            None
        }
    })
}
