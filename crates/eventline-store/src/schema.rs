//! Event log database schema.

/// SQL to create the events table. Also present under `migrations/` for
/// `sqlx::test`; keep the two in sync.
pub const CREATE_EVENTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS events (
    id        UUID PRIMARY KEY,
    timestamp TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    name      VARCHAR NOT NULL,
    source    VARCHAR NOT NULL,
    body      JSONB
);

CREATE INDEX IF NOT EXISTS idx_events_timestamp
    ON events USING BTREE (timestamp);
";
