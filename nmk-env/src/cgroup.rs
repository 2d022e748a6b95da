//! Container detection from control-group membership
//!
//! Each line of `/proc/<pid>/cgroup` reads `hierarchy-id:controllers:path`.
//! Docker and Kubernetes place their workloads under `/docker` and `/kube*`
//! paths, which is visible from inside the container through pid 1.

use std::path::Path;

use nmk_utils::{NmkError, Result};

use crate::Platform;

/// Control-group membership of the init process
pub const INIT_CGROUP: &str = "/proc/1/cgroup";

/// Path prefixes used by container runtimes and orchestrators
const CONTAINER_PREFIXES: &[&str] = &["/docker", "/kube"];

/// One `hierarchy-id:controllers:path` record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CgroupLine<'a> {
    pub hierarchy_id: &'a str,
    pub controllers: &'a str,
    pub path: &'a str,
}

impl<'a> CgroupLine<'a> {
    /// Split on the first two colons; the path may contain more
    pub fn parse(line: &'a str) -> Option<Self> {
        let mut fields = line.splitn(3, ':');
        Some(Self {
            hierarchy_id: fields.next()?,
            controllers: fields.next()?,
            path: fields.next()?,
        })
    }

    pub fn is_container(&self) -> bool {
        CONTAINER_PREFIXES
            .iter()
            .any(|prefix| self.path.starts_with(prefix))
    }
}

/// Whether any record in a cgroup listing belongs to a container
pub fn is_container_cgroup(contents: &str) -> bool {
    contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| CgroupLine::parse(line.trim()))
        .any(|cgroup| cgroup.is_container())
}

/// Whether this process runs inside a container or pod
///
/// macOS has no `/proc`, so it is never considered containerized.
pub fn is_inside_container() -> Result<bool> {
    if Platform::detect().is_mac() {
        return Ok(false);
    }
    is_inside_container_at(Path::new(INIT_CGROUP))
}

fn is_inside_container_at(path: &Path) -> Result<bool> {
    let contents = std::fs::read_to_string(path).map_err(|e| NmkError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let container = is_container_cgroup(&contents);
    if container {
        tracing::debug!("Detected container from {}", path.display());
    }
    Ok(container)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCKER_CGROUP: &str = r#"
12:cpu,cpuacct:/docker/c6fa62a9938149f6098fd0cdaffc9cdf0f526f25d97b5f6e2a4cc1fccc7f7ce1
11:perf_event:/docker/c6fa62a9938149f6098fd0cdaffc9cdf0f526f25d97b5f6e2a4cc1fccc7f7ce1
10:rdma:/
0::/system.slice/containerd.service
"#;

    const INIT_CGROUP_LISTING: &str = r#"
12:cpu,cpuacct:/
11:perf_event:/
10:rdma:/
1:name=systemd:/init.scope
0::/init.scope
"#;

    const K8S_CGROUP: &str = r#"
        12:hugetlb:/kubepods/besteffort/poda00e29fd-7bbd-11e9-8679-fa163ea7e3b8/c4b1403f3d9c
11:cpuset:/kubepods/besteffort/poda00e29fd-7bbd-11e9-8679-fa163ea7e3b8/c4b1403f3d9c
"#;

    // ==================== Parse Tests ====================

    #[test]
    fn test_parse_line() {
        let line = CgroupLine::parse("12:cpu,cpuacct:/").unwrap();
        assert_eq!(line.hierarchy_id, "12");
        assert_eq!(line.controllers, "cpu,cpuacct");
        assert_eq!(line.path, "/");
    }

    #[test]
    fn test_parse_path_with_colons() {
        let line = CgroupLine::parse("0::/system.slice/foo:bar:baz").unwrap();
        assert_eq!(line.hierarchy_id, "0");
        assert_eq!(line.controllers, "");
        assert_eq!(line.path, "/system.slice/foo:bar:baz");
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(CgroupLine::parse("12:cpu"), None);
        assert_eq!(CgroupLine::parse("garbage"), None);
    }

    // ==================== Classification Tests ====================

    #[test]
    fn test_docker() {
        assert!(is_container_cgroup(DOCKER_CGROUP));
    }

    #[test]
    fn test_init_process() {
        assert!(!is_container_cgroup(INIT_CGROUP_LISTING));
    }

    #[test]
    fn test_kubernetes() {
        assert!(is_container_cgroup(K8S_CGROUP));
    }

    #[test]
    fn test_empty_listing() {
        assert!(!is_container_cgroup(""));
        assert!(!is_container_cgroup("\n\n   \n"));
    }

    #[test]
    fn test_malformed_lines_ignored() {
        assert!(is_container_cgroup("not a cgroup\n3:memory:/docker/abc\n"));
        assert!(!is_container_cgroup("not a cgroup\n3:memory:/\n"));
    }

    #[test]
    fn test_prefix_only_matches_path_field() {
        assert!(!is_container_cgroup("3:docker:/user.slice\n"));
    }

    // ==================== File Tests ====================

    #[test]
    fn test_read_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cgroup");
        std::fs::write(&path, DOCKER_CGROUP).unwrap();
        assert!(is_inside_container_at(&path).unwrap());

        std::fs::write(&path, INIT_CGROUP_LISTING).unwrap();
        assert!(!is_inside_container_at(&path).unwrap());
    }

    #[test]
    fn test_unreadable_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = is_inside_container_at(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, NmkError::FileRead { .. }));
    }
}
