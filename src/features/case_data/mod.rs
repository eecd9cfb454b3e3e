//! Case counts, capacity snapshots and headline statistics.
//!
//! A snapshot records the counters of one province, district or municipality
//! at a point in time. Exactly one snapshot per region is active; recording a
//! new one retires the previous.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/stats` | public | National totals, or per-level stats with `province`/`district`/`municipality` |
//! | GET/POST | `/api/case-snapshots` | public / FrontEnd | List or record snapshots |
//! | GET/PUT/DELETE | `/api/case-snapshots/{id}` | public / FrontEnd | Snapshot by id |
//! | GET/POST | `/api/cases` | public / login | Individual positive cases |
//! | GET/PUT/DELETE | `/api/cases/{id}` | public / login | Case by id |
//! | GET/POST | `/api/age-groups` | public / login | Population by age band |
//! | GET/PUT/DELETE | `/api/age-groups/{id}` | public / login | Age group by id |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{CaseService, SnapshotService};
