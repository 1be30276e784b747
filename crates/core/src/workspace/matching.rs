use pomscope_api::{Artifact, ComparableVersion, Coordinate, ProjectRecord};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Full match: groupId, artifactId, version, extension and classifier.
pub fn same_artifact(candidate: &Coordinate, requested: &Coordinate) -> bool {
    candidate.artifact_id == requested.artifact_id
        && candidate.group_id == requested.group_id
        && candidate.version == requested.version
        && candidate.extension == requested.extension
        && candidate.classifier == requested.classifier
}

/// File `project` can serve for `requested`, trying the record first and
/// then its execution view.
pub fn find_in_project(
    project: &ProjectRecord,
    requested: &Coordinate,
    descriptor_extension: &str,
) -> Option<PathBuf> {
    find_in_record(project, requested, descriptor_extension).or_else(|| {
        project
            .execution
            .as_deref()
            .and_then(|view| find_in_record(view, requested, descriptor_extension))
    })
}

fn find_in_record(
    record: &ProjectRecord,
    requested: &Coordinate,
    descriptor_extension: &str,
) -> Option<PathBuf> {
    // Descriptors resolve even before anything has been built.
    if requested.extension == descriptor_extension {
        return record.descriptor.clone();
    }

    record
        .artifact
        .iter()
        .chain(record.attached.iter())
        .filter(|artifact| same_artifact(&artifact.coordinate, requested))
        .find_map(Artifact::existing_file)
        .map(Path::to_path_buf)
}

/// Deduplicate and order newest first by version precedence. Versions of
/// equal precedence but different spelling are all kept, ordered by text.
pub fn sort_newest_first(versions: impl IntoIterator<Item = String>) -> Vec<String> {
    let unique: BTreeSet<String> = versions.into_iter().collect();
    let mut parsed: Vec<ComparableVersion> =
        unique.into_iter().map(ComparableVersion::new).collect();
    parsed.sort_by(|a, b| b.cmp(a).then_with(|| a.as_str().cmp(b.as_str())));
    parsed.into_iter().map(String::from).collect()
}
