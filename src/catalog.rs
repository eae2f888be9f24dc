//! The MOVIX project showcase: what the database contains and offers.

use itertools::Itertools;

pub const TITLE: &str = "MOVIX";
pub const TAGLINE: &str = "A movie & streaming relational DBMS built with MySQL + PL/SQL";
pub const FOOTER: &str = "Built with MySQL, PL/SQL, and modern web technologies";

/// The query offered to first-time users.
pub const SAMPLE_QUERY: &str = "SELECT * FROM users LIMIT 10;";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Table {
    pub name: &'static str,
    pub description: &'static str,
    pub fields: &'static [&'static str],
}

/// A named trigger, function or procedure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Routine {
    pub name: &'static str,
    pub description: &'static str,
}

pub const FEATURES: &[Feature] = &[
    Feature {
        title: "Relational Schema",
        description: "Normalized database design with optimized table relationships",
    },
    Feature {
        title: "ER Diagram",
        description: "Complete entity-relationship model with cardinalities",
    },
    Feature {
        title: "Complex SQL Queries",
        description: "Advanced queries with joins, subqueries, and aggregations",
    },
    Feature {
        title: "PL/SQL",
        description: "Triggers, functions, and stored procedures for business logic",
    },
    Feature {
        title: "Views & Indexes",
        description: "Optimized views and strategic indexing for performance",
    },
    Feature {
        title: "Real-World Use Cases",
        description: "Streaming analytics, recommendations, and user management",
    },
];

pub const TABLES: &[Table] = &[
    Table {
        name: "Users",
        description: "Stores user account information including authentication details",
        fields: &[
            "user_id (PK)",
            "email",
            "password_hash",
            "created_at",
            "subscription_id (FK)",
        ],
    },
    Table {
        name: "Subscriptions",
        description: "Manages subscription tiers and pricing information",
        fields: &[
            "subscription_id (PK)",
            "plan_name",
            "price",
            "duration_months",
            "max_devices",
        ],
    },
    Table {
        name: "Content",
        description: "Contains movie and TV show metadata",
        fields: &[
            "content_id (PK)",
            "title",
            "type",
            "genre",
            "release_year",
            "rating",
            "duration",
        ],
    },
    Table {
        name: "Watch_History",
        description: "Tracks user viewing patterns and progress",
        fields: &[
            "watch_id (PK)",
            "user_id (FK)",
            "content_id (FK)",
            "watch_time",
            "completed",
            "timestamp",
        ],
    },
    Table {
        name: "Reviews",
        description: "Stores user ratings and reviews for content",
        fields: &[
            "review_id (PK)",
            "user_id (FK)",
            "content_id (FK)",
            "rating",
            "comment",
            "created_at",
        ],
    },
    Table {
        name: "Devices",
        description: "Manages user devices and streaming sessions",
        fields: &[
            "device_id (PK)",
            "user_id (FK)",
            "device_name",
            "device_type",
            "last_active",
        ],
    },
];

pub const TRIGGERS: &[Routine] = &[
    Routine {
        name: "update_avg_rating",
        description: "Automatically updates content average rating when a new review is added",
    },
    Routine {
        name: "check_device_limit",
        description: "Ensures users don't exceed their subscription's device limit",
    },
];

pub const FUNCTIONS: &[Routine] = &[
    Routine {
        name: "avg_watch_time",
        description: "Calculates average watch time for a user or content piece",
    },
    Routine {
        name: "subscription_name",
        description: "Returns the subscription plan name for a given user",
    },
];

pub const PROCEDURES: &[Routine] = &[
    Routine {
        name: "add_user",
        description: "Handles new user registration with validation and default subscription",
    },
    Routine {
        name: "top_rated_by_genre",
        description: "Returns top-rated content filtered by genre with ranking",
    },
    Routine {
        name: "user_watch_report",
        description: "Generates comprehensive viewing statistics for a user",
    },
];

pub fn table(name: &str) -> Option<&'static Table> {
    TABLES.iter().find(|t| t.name.eq_ignore_ascii_case(name))
}

pub fn render_header() -> String {
    format!("{TITLE}\n{TAGLINE}\n")
}

pub fn render_overview() -> String {
    let features = FEATURES
        .iter()
        .map(|f| format!("  * {}: {}\n", f.title, f.description))
        .join("");
    format!("Project Overview\n\n{features}")
}

pub fn render_table(table: &Table) -> String {
    format!(
        "  {}\n    {}\n    Fields: {}\n",
        table.name,
        table.description,
        table.fields.iter().join(", ")
    )
}

pub fn render_schema() -> String {
    let tables = TABLES.iter().map(render_table).join("\n");
    format!("Database Schema\n\n{tables}")
}

fn render_routines(heading: &str, routines: &[Routine]) -> String {
    let lines = routines
        .iter()
        .map(|r| format!("    {}: {}\n", r.name, r.description))
        .join("");
    format!("  {heading}\n{lines}")
}

pub fn render_plsql() -> String {
    let sections = [
        render_routines("Triggers", TRIGGERS),
        render_routines("Functions", FUNCTIONS),
        render_routines("Procedures", PROCEDURES),
    ]
    .iter()
    .join("\n");
    format!("PL/SQL Components\n\n{sections}")
}

/// The whole showcase, in page order.
pub fn render_all() -> String {
    [
        render_header(),
        render_overview(),
        render_schema(),
        render_plsql(),
        format!("{FOOTER}\n"),
    ]
    .iter()
    .join("\n")
}
