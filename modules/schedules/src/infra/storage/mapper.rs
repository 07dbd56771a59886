//! Entity <-> contract model conversions.

use sea_orm::Set;

use crate::contract::model::{Category, Schedule, User};
use crate::infra::storage::entity::{category, schedule, user};

impl From<user::Model> for User {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            email: m.email,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<category::Model> for Category {
    fn from(m: category::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            default_title: m.default_title,
            default_start: m.default_start,
            default_end: m.default_end,
            default_note: m.default_note,
            default_color: m.default_color,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<schedule::Model> for Schedule {
    fn from(m: schedule::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            category_id: m.category_id,
            title: m.title,
            date: m.date,
            start_time: m.start_time,
            end_time: m.end_time,
            color: m.color,
            note: m.note,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn user_active_model(u: User) -> user::ActiveModel {
    user::ActiveModel {
        id: Set(u.id),
        username: Set(u.username),
        email: Set(u.email),
        created_at: Set(u.created_at),
        updated_at: Set(u.updated_at),
    }
}

pub fn category_active_model(c: Category) -> category::ActiveModel {
    category::ActiveModel {
        id: Set(c.id),
        name: Set(c.name),
        default_title: Set(c.default_title),
        default_start: Set(c.default_start),
        default_end: Set(c.default_end),
        default_note: Set(c.default_note),
        default_color: Set(c.default_color),
        created_at: Set(c.created_at),
        updated_at: Set(c.updated_at),
    }
}

pub fn schedule_active_model(s: Schedule) -> schedule::ActiveModel {
    schedule::ActiveModel {
        id: Set(s.id),
        user_id: Set(s.user_id),
        category_id: Set(s.category_id),
        title: Set(s.title),
        date: Set(s.date),
        start_time: Set(s.start_time),
        end_time: Set(s.end_time),
        color: Set(s.color),
        note: Set(s.note),
        created_at: Set(s.created_at),
        updated_at: Set(s.updated_at),
    }
}
