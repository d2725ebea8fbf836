//! Workspace-level integration tests for clui live under `tests/`.
