//! Hierarchy validation using Validation.

use crate::core::State;
use crate::validation::violations::HierarchyViolation;
use std::collections::{HashMap, HashSet};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Result of a single validation check
pub type Check = Validation<(), NonEmptyVec<HierarchyViolation>>;

/// Id-level view of one declared state.
///
/// The root is the outline with no parent at position 0; a state is
/// composite exactly when it names an initial state.
#[derive(Clone, Debug, PartialEq)]
pub struct Outline<S: State> {
    pub id: S,
    pub parent: Option<S>,
    pub initial: Option<S>,
    /// Targets of the state's declarative rules
    pub targets: Vec<S>,
}

impl<S: State> Outline<S> {
    pub fn is_composite(&self) -> bool {
        self.initial.is_some()
    }
}

/// Validate a hierarchy description, accumulating ALL violations.
///
/// `outlines[0]` is the root. Returns `Validation::Success(())` when the
/// parent links form a single tree rooted there and every initial state and
/// rule target is legal.
pub fn validate<S: State>(outlines: &[Outline<S>]) -> Check {
    let Some(root) = outlines.first() else {
        return Validation::success(());
    };

    let mut declared: HashMap<S, &Outline<S>> = HashMap::new();
    for outline in outlines {
        declared.entry(outline.id).or_insert(outline);
    }

    let mut checks: Vec<Check> = Vec::new();
    checks.extend(check_duplicates(outlines));
    checks.extend(check_parents(root.id, outlines, &declared));
    checks.extend(check_cycles(root.id, outlines, &declared));
    checks.extend(check_composites(outlines, &declared));
    checks.extend(check_targets(root.id, outlines, &declared));

    Validation::all_vec(checks).map(|_| ())
}

fn fail(violation: HierarchyViolation) -> Check {
    Validation::fail(violation)
}

fn check_duplicates<S: State>(outlines: &[Outline<S>]) -> Vec<Check> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    outlines
        .iter()
        .filter(|o| !seen.insert(o.id) && reported.insert(o.id))
        .map(|o| {
            fail(HierarchyViolation::DuplicateState {
                state: o.id.name().to_string(),
            })
        })
        .collect()
}

fn check_parents<S: State>(
    root: S,
    outlines: &[Outline<S>],
    declared: &HashMap<S, &Outline<S>>,
) -> Vec<Check> {
    let mut checks = Vec::new();

    if let Some(top) = outlines.first() {
        let state = top.id.name().to_string();
        if let Some(parent) = top.parent {
            checks.push(fail(HierarchyViolation::RootHasParent {
                state: state.clone(),
                parent: parent.name().to_string(),
            }));
        }
        if !top.is_composite() {
            checks.push(fail(HierarchyViolation::RootNotComposite { state }));
        }
    }

    for outline in outlines.iter().skip(1) {
        let state = outline.id.name().to_string();
        match outline.parent {
            None if outline.id != root => {
                checks.push(fail(HierarchyViolation::ExtraRoot { state }));
            }
            None => {}
            Some(parent) => match declared.get(&parent) {
                None => checks.push(fail(HierarchyViolation::DanglingParent {
                    state,
                    parent: parent.name().to_string(),
                })),
                Some(p) if !p.is_composite() => {
                    checks.push(fail(HierarchyViolation::LeafParent {
                        state,
                        parent: parent.name().to_string(),
                    }))
                }
                Some(_) => {}
            },
        }
    }

    checks
}

/// Every parent chain must terminate. Chains that stop at a dangling parent
/// or a second root are reported by `check_parents`.
fn check_cycles<S: State>(
    root: S,
    outlines: &[Outline<S>],
    declared: &HashMap<S, &Outline<S>>,
) -> Vec<Check> {
    let limit = declared.len();

    outlines
        .iter()
        .filter(|outline| {
            let mut cursor = outline.id;
            for _ in 0..=limit {
                if cursor == root {
                    return false;
                }
                match declared.get(&cursor).and_then(|o| o.parent) {
                    Some(parent) if declared.contains_key(&parent) => cursor = parent,
                    _ => return false,
                }
            }
            true
        })
        .map(|outline| {
            fail(HierarchyViolation::Cycle {
                state: outline.id.name().to_string(),
            })
        })
        .collect()
}

fn check_composites<S: State>(
    outlines: &[Outline<S>],
    declared: &HashMap<S, &Outline<S>>,
) -> Vec<Check> {
    let limit = declared.len();
    let mut checks = Vec::new();

    for outline in outlines.iter().filter(|o| o.is_composite()) {
        let state = outline.id.name().to_string();

        let has_children = outlines.iter().any(|o| o.parent == Some(outline.id));
        if !has_children {
            checks.push(fail(HierarchyViolation::EmptyComposite {
                state: state.clone(),
            }));
        }

        let Some(initial) = outline.initial else {
            continue;
        };

        let mut cursor = declared.get(&initial).and_then(|o| o.parent);
        let mut descends = false;
        for _ in 0..limit {
            match cursor {
                Some(id) if id == outline.id => {
                    descends = true;
                    break;
                }
                Some(id) => cursor = declared.get(&id).and_then(|o| o.parent),
                None => break,
            }
        }

        if !descends {
            checks.push(fail(HierarchyViolation::InitialNotDescendant {
                state,
                initial: initial.name().to_string(),
            }));
        }
    }

    checks
}

fn check_targets<S: State>(
    root: S,
    outlines: &[Outline<S>],
    declared: &HashMap<S, &Outline<S>>,
) -> Vec<Check> {
    let mut checks = Vec::new();

    for outline in outlines {
        for target in &outline.targets {
            if *target == root {
                checks.push(fail(HierarchyViolation::TopTarget {
                    state: outline.id.name().to_string(),
                }));
            } else if !declared.contains_key(target) {
                checks.push(fail(HierarchyViolation::UnknownTarget {
                    state: outline.id.name().to_string(),
                    target: target.name().to_string(),
                }));
            }
        }
    }

    checks
}
