use reg_core::args::decode_json_arg;
use reg_core::entities::CourseResult;
use reg_core::semester::Semester;

/// Decode a JSON array of course IDs.
pub fn parse_course_ids(raw: &str) -> anyhow::Result<Vec<String>> {
    Ok(decode_json_arg("courseIds", raw)?)
}

/// Decode a JSON array of `{courseId, grade}` results.
pub fn parse_results(raw: &str) -> anyhow::Result<Vec<CourseResult>> {
    Ok(decode_json_arg("results", raw)?)
}

/// Parse a `Semester<N>` label.
pub fn parse_semester(raw: &str) -> anyhow::Result<Semester> {
    Ok(Semester::parse(raw)?)
}
