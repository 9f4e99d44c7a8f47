//! Output paths and the lifecycle of generated files.
//!
//! The registry is two-phase. Existing outputs are scanned once, up front,
//! and never touched while templates are specialized; every unit of work
//! returns [`Claim`]s instead. [`reduce`] then folds the scan and the claims
//! into per-path records, the writes still to perform and the orphans to
//! delete.
//!
//! ```text
//! Unclaimed ──claim──▶ Claimed ──▶ Written | Kept
//!     │
//!     └─ never claimed ──▶ Deleted
//! ```

use rustc_hash::{FxHashMap, FxHashSet};
use specgen_core::{Instantiation, Placeholder, TemplateSyntax};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{GenerateError, Result};

/// The output path of an instantiation, relative to the output root.
///
/// Placeholder names in every path component are replaced by the boxed
/// names of their bindings, primary first.
pub fn output_path(template: &Path, instantiation: &Instantiation, syntax: &TemplateSyntax) -> PathBuf {
    template
        .components()
        .map(|component| match component {
            Component::Normal(part) => {
                let mut part = part.to_string_lossy().into_owned();
                for placeholder in Placeholder::BOTH {
                    if let Some(ty) = instantiation.resolve(placeholder) {
                        part = part.replace(syntax.name(placeholder), ty.boxed_name());
                    }
                }
                PathBuf::from(part)
            }
            other => PathBuf::from(other.as_os_str()),
        })
        .collect()
}

/// Files with the given extension under `root`, sorted.
///
/// A missing root has no outputs.
pub fn scan(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|source| GenerateError::Scan {
            path: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        if path.extension().and_then(|e| e.to_str()) == Some(extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// What an instantiation wants done with its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Write this text.
    Write(String),
    /// The output is up to date.
    Keep,
    /// The template failed; leave whatever is on disk.
    Preserve,
}

/// One instantiation's claim on an output path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    /// Absolute output path.
    pub path: PathBuf,
    /// Who claims it, for diagnostics: `template [binding]`.
    pub owner: String,
    pub action: Action,
}

impl Claim {
    pub fn new(path: PathBuf, instantiation: &Instantiation, action: Action) -> Self {
        Self {
            path,
            owner: instantiation.to_string(),
            action,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputState {
    /// On disk, not (yet) claimed by any instantiation.
    Unclaimed,
    /// Claimed by an instantiation whose template failed.
    Claimed,
    Written,
    Kept,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    pub path: PathBuf,
    pub state: OutputState,
}

impl OutputRecord {
    pub fn claimed(&self) -> bool {
        matches!(
            self.state,
            OutputState::Claimed | OutputState::Written | OutputState::Kept
        )
    }

    pub fn updated(&self) -> bool {
        self.state == OutputState::Written
    }
}

/// The folded result of a run, before any file is written or deleted.
#[derive(Debug, Default)]
pub struct Reduction {
    /// One record per path, sorted by path.
    pub records: Vec<OutputRecord>,
    /// Outputs to write, in claim order.
    pub writes: Vec<(PathBuf, String)>,
    /// Existing outputs nobody claimed, sorted.
    pub orphans: Vec<PathBuf>,
    /// Claims on a path that an earlier claim already holds.
    pub duplicates: Vec<GenerateError>,
}

impl Reduction {
    /// Outputs claimed by a live instantiation.
    pub fn generated(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.state, OutputState::Written | OutputState::Kept))
            .count()
    }

    pub fn record_mut(&mut self, path: &Path) -> Option<&mut OutputRecord> {
        self.records
            .binary_search_by(|r| r.path.as_path().cmp(path))
            .ok()
            .map(|i| &mut self.records[i])
    }
}

/// Fold the scan of existing outputs and all claims of a run.
///
/// The first claim on a path wins; later ones are reported as duplicates and
/// dropped. Claims are expected in a deterministic order so the winner is
/// stable between runs.
pub fn reduce(existing: &[PathBuf], claims: Vec<Claim>) -> Reduction {
    let mut owners: FxHashMap<PathBuf, String> = FxHashMap::default();
    let mut states: FxHashMap<PathBuf, OutputState> = FxHashMap::default();
    let mut reduction = Reduction::default();

    for claim in claims {
        if let Some(first) = owners.get(&claim.path) {
            reduction.duplicates.push(GenerateError::DuplicateOutput {
                path: claim.path,
                first: first.clone(),
                second: claim.owner,
            });
            continue;
        }
        let state = match claim.action {
            Action::Write(text) => {
                reduction.writes.push((claim.path.clone(), text));
                OutputState::Written
            }
            Action::Keep => OutputState::Kept,
            Action::Preserve => OutputState::Claimed,
        };
        states.insert(claim.path.clone(), state);
        owners.insert(claim.path, claim.owner);
    }

    let existing: FxHashSet<&PathBuf> = existing.iter().collect();
    for path in existing {
        if !states.contains_key(path) {
            states.insert(path.clone(), OutputState::Unclaimed);
            reduction.orphans.push(path.clone());
        }
    }
    reduction.orphans.sort();

    reduction.records = states
        .into_iter()
        .map(|(path, state)| OutputRecord { path, state })
        .collect();
    reduction.records.sort_by(|a, b| a.path.cmp(&b.path));
    reduction
}

#[cfg(test)]
mod tests {
    use super::*;
    use specgen_core::ConcreteType::*;

    #[test]
    fn paths_substitute_boxed_names() {
        let syntax = TemplateSyntax::default();
        let template = Path::new("com/carrotsearch/KTypeVTypeHashMap.java");
        let inst = Instantiation::with_secondary(template, Int, Long);
        assert_eq!(
            output_path(template, &inst, &syntax),
            PathBuf::from("com/carrotsearch/IntLongHashMap.java")
        );

        let inst = Instantiation::with_secondary(template, Generic, Generic);
        assert_eq!(
            output_path(template, &inst, &syntax),
            PathBuf::from("com/carrotsearch/ObjectObjectHashMap.java")
        );
    }

    #[test]
    fn paths_substitute_directories() {
        let syntax = TemplateSyntax::default();
        let template = Path::new("KTypeLists/KTypeArrayList.java");
        let inst = Instantiation::new(template, Char);
        assert_eq!(
            output_path(template, &inst, &syntax),
            PathBuf::from("CharLists/CharArrayList.java")
        );
    }

    fn claim(path: &str, action: Action) -> Claim {
        Claim {
            path: PathBuf::from(path),
            owner: format!("owner of {path}"),
            action,
        }
    }

    #[test]
    fn reduce_tracks_states_and_orphans() {
        let existing = vec![
            PathBuf::from("out/IntList.java"),
            PathBuf::from("out/LongList.java"),
            PathBuf::from("out/Stale.java"),
        ];
        let claims = vec![
            claim("out/IntList.java", Action::Keep),
            claim("out/LongList.java", Action::Write("class LongList {}".into())),
            claim("out/ByteList.java", Action::Write("class ByteList {}".into())),
            claim("out/CharList.java", Action::Preserve),
        ];
        let reduction = reduce(&existing, claims);

        assert_eq!(reduction.orphans, vec![PathBuf::from("out/Stale.java")]);
        assert_eq!(reduction.writes.len(), 2);
        assert_eq!(reduction.writes[0].0, PathBuf::from("out/LongList.java"));
        assert!(reduction.duplicates.is_empty());
        assert_eq!(reduction.generated(), 3);

        let states: Vec<_> = reduction
            .records
            .iter()
            .map(|r| (r.path.to_str().unwrap(), r.state))
            .collect();
        assert_eq!(
            states,
            vec![
                ("out/ByteList.java", OutputState::Written),
                ("out/CharList.java", OutputState::Claimed),
                ("out/IntList.java", OutputState::Kept),
                ("out/LongList.java", OutputState::Written),
                ("out/Stale.java", OutputState::Unclaimed),
            ]
        );
    }

    #[test]
    fn preserved_outputs_are_not_orphans() {
        let existing = vec![PathBuf::from("out/IntList.java")];
        let reduction = reduce(&existing, vec![claim("out/IntList.java", Action::Preserve)]);
        assert!(reduction.orphans.is_empty());
        assert!(reduction.records[0].claimed());
        assert!(!reduction.records[0].updated());
    }

    #[test]
    fn first_claim_wins() {
        let claims = vec![
            claim("out/IntList.java", Action::Write("first".into())),
            Claim {
                owner: "second".to_string(),
                ..claim("out/IntList.java", Action::Write("second".into()))
            },
        ];
        let reduction = reduce(&[], claims);
        assert_eq!(reduction.writes, vec![(PathBuf::from("out/IntList.java"), "first".to_string())]);
        assert_eq!(reduction.duplicates.len(), 1);
        let GenerateError::DuplicateOutput { first, second, .. } = &reduction.duplicates[0] else {
            panic!("expected duplicate output");
        };
        assert_eq!(first, "owner of out/IntList.java");
        assert_eq!(second, "second");
    }

    #[test]
    fn record_lookup() {
        let mut reduction = reduce(&[PathBuf::from("b.java"), PathBuf::from("a.java")], vec![]);
        let record = reduction.record_mut(Path::new("b.java")).unwrap();
        record.state = OutputState::Deleted;
        assert_eq!(reduction.records[1].state, OutputState::Deleted);
        assert!(reduction.record_mut(Path::new("c.java")).is_none());
    }

    #[test]
    fn scan_missing_root_is_empty() {
        let files = scan(Path::new("/nonexistent/specgen/output"), "java").unwrap();
        assert!(files.is_empty());
    }
}
