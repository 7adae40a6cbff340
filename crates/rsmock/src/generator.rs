//! Interface extraction and mock assembly.
//!
//! A [`Generator`] owns the parsed file set of one package and the
//! [`Model`] being assembled. One generation run builds the model
//! linearly — parse, extract, render — and never retries.

use crate::model::{Method, Model, Structure};
use crate::typestr;
use crate::{render, Error};
use goparse::ast::{InterfaceElem, SourceFile, Type};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

pub struct Generator {
    files: Vec<SourceFile>,
    model: Model,
}

impl Generator {
    /// Parse every buildable `.go` file in one package directory
    /// (non-recursive; `_test.go` files are not part of the build set).
    pub fn from_dir(dir: &Path) -> Result<Self, Error> {
        let mut names: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if file_name.ends_with(".go") && !file_name.ends_with("_test.go") {
                names.push(path);
            }
        }
        names.sort();
        if names.is_empty() {
            return Err(Error::NoGoFiles {
                dir: dir.display().to_string(),
            });
        }
        Self::from_files(&names)
    }

    /// Parse an explicit list of source files belonging to one package.
    /// Names without a `.go` extension are ignored.
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self, Error> {
        let mut files = Vec::new();
        for path in paths {
            let path = path.as_ref();
            if path.extension().and_then(|e| e.to_str()) != Some("go") {
                continue;
            }
            let src = fs::read_to_string(path)?;
            let file = goparse::parse_file(&src).map_err(|failure| Error::Parse {
                name: path.display().to_string(),
                failure,
            })?;
            files.push(file);
        }
        if files.is_empty() {
            return Err(Error::NoGoFiles {
                dir: ".".to_string(),
            });
        }
        Ok(Self::from_parsed(files))
    }

    /// Parse one in-memory source (streaming mode).
    pub fn from_source(src: &str) -> Result<Self, Error> {
        let file = goparse::parse_file(src).map_err(|failure| Error::Parse {
            name: "<stream>".to_string(),
            failure,
        })?;
        Ok(Self::from_parsed(vec![file]))
    }

    pub fn from_reader<R: Read>(mut r: R) -> Result<Self, Error> {
        let mut src = String::new();
        r.read_to_string(&mut src)?;
        Self::from_source(&src)
    }

    fn from_parsed(files: Vec<SourceFile>) -> Self {
        let mut model = Model {
            package_name: files[0].package.clone(),
            ..Model::default()
        };
        // Imports are copied verbatim, collected once per run; unused
        // ones are not pruned.
        for file in &files {
            for imp in &file.imports {
                model.imports.push(imp.text());
            }
        }
        Self { files, model }
    }

    pub fn package_name(&self) -> &str {
        &self.model.package_name
    }

    /// Override the destination package name taken from the source.
    pub fn set_package_name(&mut self, name: &str) {
        self.model.package_name = name.to_string();
    }

    /// Append a mock structure for the named interface. Names that
    /// match nothing — or match declarations that are not
    /// interface-shaped — are silently skipped.
    pub fn generate(&mut self, type_name: &str) -> Result<(), Error> {
        let mut found = Vec::new();
        for file in &self.files {
            for decl in &file.types {
                if decl.name != type_name {
                    continue;
                }
                let Type::Interface { elems } = &decl.typ else {
                    continue;
                };
                found.push(structure_from(&decl.name, elems)?);
            }
        }
        self.model.structures.extend(found);
        Ok(())
    }

    /// Streaming mode: mock every interface declared in the file set,
    /// in declaration order.
    pub fn generate_all(&mut self) -> Result<(), Error> {
        let mut found = Vec::new();
        for file in &self.files {
            for decl in &file.types {
                let Type::Interface { elems } = &decl.typ else {
                    continue;
                };
                found.push(structure_from(&decl.name, elems)?);
            }
        }
        self.model.structures.extend(found);
        Ok(())
    }

    /// Expand the mock template without formatting.
    pub fn expand(&self) -> Result<String, Error> {
        render::expand(&self.model)
    }

    /// Expand the mock template and best-effort format the result.
    pub fn render(&self) -> Result<String, Error> {
        render::render(&self.model)
    }

    pub fn model(&self) -> &Model {
        &self.model
    }
}

fn structure_from(name: &str, elems: &[InterfaceElem]) -> Result<Structure, Error> {
    let mut methods = Vec::new();
    for elem in elems {
        // Embedded interface elements carry no extractable signature.
        let InterfaceElem::Method(m) = elem else {
            continue;
        };
        let (params, returns) = typestr::signature_vars(&m.sig)?;
        methods.push(Method {
            name: m.name.clone(),
            params,
            returns,
        });
    }
    Ok(Structure {
        name: name.to_string(),
        methods,
    })
}
