pub(super) const SCHEMA: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS assign_offline_submissions (
        site_id TEXT NOT NULL,
        assign_id INTEGER NOT NULL,
        user_id INTEGER NOT NULL,
        course_id INTEGER NOT NULL,
        plugin_data TEXT NOT NULL,
        online_time_modified INTEGER NOT NULL,
        submitted INTEGER NOT NULL DEFAULT 0,
        submission_statement INTEGER NOT NULL DEFAULT 0,
        time_created INTEGER NOT NULL,
        time_modified INTEGER NOT NULL,
        PRIMARY KEY (site_id, assign_id, user_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS assign_offline_grades (
        site_id TEXT NOT NULL,
        assign_id INTEGER NOT NULL,
        user_id INTEGER NOT NULL,
        course_id INTEGER NOT NULL,
        grade REAL,
        attempt_number INTEGER NOT NULL,
        add_attempt INTEGER NOT NULL DEFAULT 0,
        workflow_state TEXT,
        apply_to_all INTEGER NOT NULL DEFAULT 0,
        outcomes TEXT NOT NULL,
        plugin_data TEXT NOT NULL,
        time_modified INTEGER NOT NULL,
        PRIMARY KEY (site_id, assign_id, user_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sync_times (
        site_id TEXT NOT NULL,
        component TEXT NOT NULL,
        entity_id INTEGER NOT NULL,
        time INTEGER NOT NULL,
        PRIMARY KEY (site_id, component, entity_id)
    )
    "#,
];

pub(super) const UPSERT_SUBMISSION: &str = r#"
    INSERT INTO assign_offline_submissions (
        site_id, assign_id, user_id, course_id, plugin_data, online_time_modified,
        submitted, submission_statement, time_created, time_modified
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
    ON CONFLICT(site_id, assign_id, user_id) DO UPDATE SET
        course_id = excluded.course_id,
        plugin_data = excluded.plugin_data,
        online_time_modified = excluded.online_time_modified,
        submitted = excluded.submitted,
        submission_statement = excluded.submission_statement,
        time_modified = excluded.time_modified
"#;

pub(super) const SELECT_SUBMISSION: &str = r#"
    SELECT assign_id, user_id, course_id, plugin_data, online_time_modified,
           submitted, submission_statement, time_created, time_modified
    FROM assign_offline_submissions
    WHERE site_id = ?1 AND assign_id = ?2 AND user_id = ?3
"#;

pub(super) const SELECT_SUBMISSIONS_BY_ASSIGN: &str = r#"
    SELECT assign_id, user_id, course_id, plugin_data, online_time_modified,
           submitted, submission_statement, time_created, time_modified
    FROM assign_offline_submissions
    WHERE site_id = ?1 AND assign_id = ?2
    ORDER BY user_id
"#;

pub(super) const DELETE_SUBMISSION: &str = r#"
    DELETE FROM assign_offline_submissions
    WHERE site_id = ?1 AND assign_id = ?2 AND user_id = ?3
"#;

pub(super) const UPSERT_GRADE: &str = r#"
    INSERT INTO assign_offline_grades (
        site_id, assign_id, user_id, course_id, grade, attempt_number, add_attempt,
        workflow_state, apply_to_all, outcomes, plugin_data, time_modified
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
    ON CONFLICT(site_id, assign_id, user_id) DO UPDATE SET
        course_id = excluded.course_id,
        grade = excluded.grade,
        attempt_number = excluded.attempt_number,
        add_attempt = excluded.add_attempt,
        workflow_state = excluded.workflow_state,
        apply_to_all = excluded.apply_to_all,
        outcomes = excluded.outcomes,
        plugin_data = excluded.plugin_data,
        time_modified = excluded.time_modified
"#;

pub(super) const SELECT_GRADE: &str = r#"
    SELECT assign_id, user_id, course_id, grade, attempt_number, add_attempt,
           workflow_state, apply_to_all, outcomes, plugin_data, time_modified
    FROM assign_offline_grades
    WHERE site_id = ?1 AND assign_id = ?2 AND user_id = ?3
"#;

pub(super) const SELECT_GRADES_BY_ASSIGN: &str = r#"
    SELECT assign_id, user_id, course_id, grade, attempt_number, add_attempt,
           workflow_state, apply_to_all, outcomes, plugin_data, time_modified
    FROM assign_offline_grades
    WHERE site_id = ?1 AND assign_id = ?2
    ORDER BY user_id
"#;

pub(super) const DELETE_GRADE: &str = r#"
    DELETE FROM assign_offline_grades
    WHERE site_id = ?1 AND assign_id = ?2 AND user_id = ?3
"#;

pub(super) const SELECT_ASSIGN_IDS_WITH_DATA: &str = r#"
    SELECT assign_id FROM assign_offline_submissions WHERE site_id = ?1
    UNION
    SELECT assign_id FROM assign_offline_grades WHERE site_id = ?1
    ORDER BY assign_id
"#;

pub(super) const SELECT_SITES_WITH_DATA: &str = r#"
    SELECT site_id FROM assign_offline_submissions
    UNION
    SELECT site_id FROM assign_offline_grades
    ORDER BY site_id
"#;

pub(super) const SELECT_HAS_DATA: &str = r#"
    SELECT
        EXISTS(SELECT 1 FROM assign_offline_submissions WHERE site_id = ?1 AND assign_id = ?2)
        OR EXISTS(SELECT 1 FROM assign_offline_grades WHERE site_id = ?1 AND assign_id = ?2)
        AS has_data
"#;

pub(super) const SELECT_SYNC_TIME: &str = r#"
    SELECT time FROM sync_times
    WHERE site_id = ?1 AND component = ?2 AND entity_id = ?3
"#;

pub(super) const UPSERT_SYNC_TIME: &str = r#"
    INSERT INTO sync_times (site_id, component, entity_id, time)
    VALUES (?1, ?2, ?3, ?4)
    ON CONFLICT(site_id, component, entity_id) DO UPDATE SET time = excluded.time
"#;
