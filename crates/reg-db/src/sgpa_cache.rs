//! In-process SGPA cache.
//!
//! Holds, per student, the SGPA of each graded semester together with the
//! store versions of every record it was computed from: the enrollment
//! snapshot and each graded course. An entry is only handed out while the
//! enrollment version is current, and callers must confirm the course
//! versions before serving it. The cache can be dropped at any time
//! without losing anything. Mutations never read from it.

use std::collections::{BTreeMap, HashMap};

use reg_core::semester::Semester;
use tokio::sync::RwLock;

/// Store versions an SGPA value was derived from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SgpaStamp {
    pub enrollment: i64,
    pub courses: BTreeMap<String, i64>,
}

impl SgpaStamp {
    #[must_use]
    pub fn new(enrollment: i64) -> Self {
        Self {
            enrollment,
            courses: BTreeMap::new(),
        }
    }

    /// Whether `other` saw any course at a different version.
    fn disagrees_with(&self, other: &Self) -> bool {
        self.enrollment != other.enrollment
            || other
                .courses
                .iter()
                .any(|(id, v)| self.courses.get(id).is_some_and(|mine| mine != v))
    }
}

/// A cached entry: the stamp and the per-semester values.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedSgpa {
    pub stamp: SgpaStamp,
    pub sgpa: BTreeMap<Semester, f64>,
}

#[derive(Debug, Default)]
pub struct SgpaCache {
    entries: RwLock<HashMap<String, CachedSgpa>>,
}

impl SgpaCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry for `student_id`, if computed at this enrollment version.
    /// Course versions in the stamp are still to be checked by the caller.
    pub async fn get(&self, student_id: &str, enrollment_version: i64) -> Option<CachedSgpa> {
        let entries = self.entries.read().await;
        entries
            .get(student_id)
            .filter(|entry| entry.stamp.enrollment == enrollment_version)
            .cloned()
    }

    /// Record one semester's value. The entry is reset when `stamp` saw the
    /// enrollment or any shared course at another version.
    pub async fn put_semester(
        &self,
        student_id: &str,
        stamp: SgpaStamp,
        semester: Semester,
        sgpa: f64,
    ) {
        let mut entries = self.entries.write().await;
        let entry = entries
            .entry(student_id.to_string())
            .or_insert_with(|| CachedSgpa {
                stamp: SgpaStamp::new(stamp.enrollment),
                sgpa: BTreeMap::new(),
            });
        if entry.stamp.disagrees_with(&stamp) {
            entry.stamp = SgpaStamp::new(stamp.enrollment);
            entry.sgpa.clear();
        }
        entry.stamp.courses.extend(stamp.courses);
        entry.sgpa.insert(semester, sgpa);
    }

    /// Replace the whole entry for `student_id`.
    pub async fn replace(&self, student_id: &str, stamp: SgpaStamp, sgpa: BTreeMap<Semester, f64>) {
        self.entries
            .write()
            .await
            .insert(student_id.to_string(), CachedSgpa { stamp, sgpa });
    }

    /// Drop the entry for `student_id`. Returns whether one existed.
    pub async fn invalidate(&self, student_id: &str) -> bool {
        self.entries.write().await.remove(student_id).is_some()
    }

    /// Raw entry regardless of version, for inspection.
    pub async fn peek(&self, student_id: &str) -> Option<CachedSgpa> {
        self.entries.read().await.get(student_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sem(n: u32) -> Semester {
        Semester::new(n).unwrap()
    }

    fn stamp(enrollment: i64, courses: &[(&str, i64)]) -> SgpaStamp {
        SgpaStamp {
            enrollment,
            courses: courses.iter().map(|(id, v)| ((*id).to_string(), *v)).collect(),
        }
    }

    #[tokio::test]
    async fn serves_only_matching_enrollment_version() {
        let cache = SgpaCache::new();
        cache.put_semester("S1", stamp(3, &[("CS101", 1)]), sem(1), 9.0).await;
        let entry = cache.get("S1", 3).await.unwrap();
        assert_eq!(entry.sgpa[&sem(1)], 9.0);
        assert_eq!(entry.stamp.courses["CS101"], 1);
        assert_eq!(cache.get("S1", 4).await, None);
        assert_eq!(cache.get("S2", 3).await, None);
    }

    #[tokio::test]
    async fn newer_enrollment_version_resets_entry() {
        let cache = SgpaCache::new();
        cache.put_semester("S1", stamp(3, &[]), sem(1), 9.0).await;
        cache.put_semester("S1", stamp(5, &[]), sem(2), 8.0).await;
        let entry = cache.peek("S1").await.unwrap();
        assert_eq!(entry.stamp.enrollment, 5);
        assert_eq!(entry.sgpa.keys().copied().collect::<Vec<_>>(), vec![sem(2)]);
    }

    #[tokio::test]
    async fn changed_course_version_resets_entry() {
        let cache = SgpaCache::new();
        cache.put_semester("S1", stamp(3, &[("CS101", 1)]), sem(1), 9.0).await;
        cache.put_semester("S1", stamp(3, &[("MA101", 1)]), sem(2), 8.0).await;
        assert_eq!(cache.peek("S1").await.unwrap().sgpa.len(), 2);

        cache.put_semester("S1", stamp(3, &[("CS101", 3)]), sem(1), 7.0).await;
        let entry = cache.peek("S1").await.unwrap();
        assert_eq!(entry.sgpa.keys().copied().collect::<Vec<_>>(), vec![sem(1)]);
        assert_eq!(entry.stamp, stamp(3, &[("CS101", 3)]));
    }

    #[tokio::test]
    async fn invalidate_removes_entry() {
        let cache = SgpaCache::new();
        let mut sgpa = BTreeMap::new();
        sgpa.insert(sem(1), 7.5);
        cache.replace("S1", stamp(1, &[]), sgpa).await;
        assert!(cache.invalidate("S1").await);
        assert!(!cache.invalidate("S1").await);
        assert_eq!(cache.peek("S1").await, None);
    }
}
