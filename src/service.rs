use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{ApiError, ErrorCode, Failure};
use crate::messages;
use crate::models::{
    PageResponse, User, UserDetails, UserFilter, UserResponse, UserRole,
};
use crate::notify::{Notification, NotificationSink};
use crate::store::UserStore;

/// User use cases. Every method returns a typed [`Failure`] for the boundary to classify.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    notifications: NotificationSink,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, notifications: NotificationSink) -> Self {
        Self {
            store,
            notifications,
        }
    }

    pub fn create_user(&self, details: UserDetails) -> Result<UserResponse, Failure> {
        self.check_email_free(&details.email)?;

        let user = User {
            id: Uuid::new_v4(),
            name: details.name,
            surname: details.surname,
            email: details.email,
            password: details.password,
            phone_number: details.phone_number,
            date_of_birth: details.date_of_birth,
            user_role: UserRole::RoleUser,
            created_at: Utc::now(),
            updated_at: None,
        };

        let saved = self.store.save(user)?;
        tracing::info!(user_id = %saved.id, "user created");

        self.notifications.publish(Notification::UserRegistered {
            email: saved.email.clone(),
        });
        Ok(UserResponse::from(&saved))
    }

    pub fn get_user_by_id(&self, user_id: Uuid) -> Result<UserResponse, Failure> {
        let user = self.find_existing(user_id)?;
        Ok(UserResponse::from(&user))
    }

    pub fn get_all(
        &self,
        filter: &UserFilter,
        page: usize,
        size: usize,
    ) -> Result<PageResponse<UserResponse>, Failure> {
        let users = self.store.find_all(filter, page, size)?;
        if users.items.is_empty() {
            return Err(ApiError::not_found(messages::NO_USERS_FOUND, ErrorCode::UserNotFound).into());
        }
        Ok(PageResponse::from_page(users, |user| UserResponse::from(&user)))
    }

    pub fn update_user(
        &self,
        details: UserDetails,
        user_id: Uuid,
    ) -> Result<UserResponse, Failure> {
        let mut user = self.find_existing(user_id)?;

        if user.email != details.email {
            self.check_email_free(&details.email)?;
        }

        user.name = details.name;
        user.surname = details.surname;
        user.email = details.email;
        user.password = details.password;
        user.phone_number = details.phone_number;
        user.date_of_birth = details.date_of_birth;
        user.updated_at = Some(Utc::now());

        let saved = self.store.save(user)?;
        tracing::info!(user_id = %saved.id, "user updated");
        Ok(UserResponse::from(&saved))
    }

    pub fn delete_user_by_id(&self, user_id: Uuid) -> Result<(), Failure> {
        self.find_existing(user_id)?;
        self.store.delete_by_id(user_id)?;
        tracing::info!(%user_id, "user deleted");
        Ok(())
    }

    fn find_existing(&self, user_id: Uuid) -> Result<User, Failure> {
        self.store.find_by_id(user_id)?.ok_or_else(|| {
            ApiError::not_found(messages::user_not_found(user_id), ErrorCode::UserNotFound).into()
        })
    }

    fn check_email_free(&self, email: &str) -> Result<(), Failure> {
        if self.store.exists_by_email(email)? {
            return Err(
                ApiError::business(messages::EMAIL_ALREADY_TAKEN, ErrorCode::UserExistEmail).into(),
            );
        }
        Ok(())
    }
}
