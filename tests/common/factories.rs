//! Snapshot factories for integration tests

use serde_json::json;

/// A small but representative org: two departments, three learners, one
/// admin, three courses, with completions spread over several months.
pub fn org_snapshot() -> (serde_json::Value, serde_json::Value) {
    let people = json!([
        {
            "id": "u1",
            "name": "Ana Ruiz",
            "email": "ana@example.com",
            "department": "Sales",
            "role": "employee",
            "assigned_course_ids": ["c1", "c2"],
            "progress": [
                {
                    "course_id": "c1",
                    "progress_percent": 100.0,
                    "assigned_at": "2025-01-10T00:00:00Z",
                    "completed_at": "2025-02-01T00:00:00Z",
                    "score": 92.0,
                    "attempts": 1
                },
                {
                    "course_id": "c2",
                    "progress_percent": 45.0,
                    "assigned_at": "2025-02-20T00:00:00Z",
                    "attempts": 1
                }
            ]
        },
        {
            "id": "u2",
            "name": "Smith, \"Jr.\"",
            "email": "smith@example.com",
            "department": "Sales",
            "role": "employee",
            "assigned_course_ids": ["c1"],
            "progress": [
                {
                    "course_id": "c1",
                    "progress_percent": 0.0,
                    "assigned_at": "2025-01-20T00:00:00Z",
                    "attempts": 0
                }
            ]
        },
        {
            "id": "u3",
            "name": "Luis Mora",
            "email": "luis@example.com",
            "department": "IT",
            "role": "intern",
            "assigned_course_ids": ["c2", "c3"],
            "progress": [
                {
                    "course_id": "c2",
                    "progress_percent": 100.0,
                    "assigned_at": "2025-02-10T00:00:00Z",
                    "completed_at": "2025-03-05T00:00:00Z",
                    "score": 88.0,
                    "attempts": 2
                },
                {
                    "course_id": "c3",
                    "progress_percent": 10.0,
                    "assigned_at": "2025-03-01T00:00:00Z",
                    "attempts": 0
                }
            ]
        },
        {
            "id": "u4",
            "name": "Eva Duarte",
            "email": "eva@example.com",
            "department": "IT",
            "role": "admin",
            "assigned_course_ids": [],
            "progress": []
        }
    ]);

    let courses = json!([
        {
            "id": "c1",
            "title": "Rust Fundamentals",
            "category": "Engineering",
            "difficulty": "intermediate",
            "estimated_minutes": 120,
            "is_active": true,
            "created_at": "2024-06-01T00:00:00Z"
        },
        {
            "id": "c2",
            "title": "Data Privacy",
            "category": "Compliance",
            "difficulty": "beginner",
            "estimated_minutes": 60,
            "is_active": true,
            "created_at": "2024-09-01T00:00:00Z"
        },
        {
            "id": "c3",
            "title": "Leadership",
            "category": "Soft Skills",
            "difficulty": "advanced",
            "estimated_minutes": 180,
            "is_active": true,
            "created_at": "2025-01-15T00:00:00Z"
        }
    ]);

    (people, courses)
}
