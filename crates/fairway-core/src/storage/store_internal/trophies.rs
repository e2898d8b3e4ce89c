use crate::errors::StoreError;
use crate::storage::{Grant, TrophyRow};
use crate::trophy::Trophy;
use chrono::Utc;
use rusqlite::{params, Connection};

/// Insert-if-absent. The primary key makes concurrent duplicates collapse.
pub(crate) fn grant_impl(
    conn: &Connection,
    golfer_id: i64,
    trophy: Trophy,
) -> Result<Grant, StoreError> {
    let inserted = conn.execute(
        r#"
        INSERT INTO trophies (earned, user_id, trophy) VALUES (?1, ?2, ?3)
        ON CONFLICT(user_id, trophy) DO NOTHING
        "#,
        params![Utc::now().to_rfc3339(), golfer_id, trophy.as_str()],
    )?;

    Ok(if inserted == 1 {
        Grant::Granted
    } else {
        Grant::AlreadyHeld
    })
}

pub(crate) fn list_impl(conn: &Connection, golfer_id: i64) -> Result<Vec<TrophyRow>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT trophy, earned FROM trophies WHERE user_id = ?1 ORDER BY earned, trophy",
    )?;
    let rows = stmt.query_map([golfer_id], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut out = Vec::new();
    for r in rows {
        let (id, earned) = r?;
        let trophy = id
            .parse::<Trophy>()
            .map_err(|e| StoreError::Integrity(e.to_string()))?;
        out.push(TrophyRow { trophy, earned });
    }
    Ok(out)
}
