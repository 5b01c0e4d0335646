use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{DependOnUserQuery, UserQuery};
use kernel::interface::update::{DependOnUserModifier, UserModifier};
use kernel::prelude::entity::{CreatedAt, CredentialHash, Permission, User, UserId, UserName};
use kernel::KernelError;

use crate::service::Authorize;
use crate::transfer::{required_text, ChangeRoleDto, GetUserDto, RegisterUserDto, UserDto};

fn not_found(id: &UserId) -> Report<KernelError> {
    Report::new(KernelError::NotFound)
        .attach(id.clone())
        .attach_printable("User not found")
}

#[async_trait::async_trait]
pub trait RegisterUserService:
    'static + Sync + Send + Authorize + DependOnUserQuery + DependOnUserModifier
{
    /// The very first user may be registered without an actor so that an
    /// empty store can be bootstrapped. Afterwards an actor holding
    /// `manage_users` is required.
    #[tracing::instrument(skip_all)]
    async fn register_user(&self, dto: RegisterUserDto) -> error_stack::Result<UserDto, KernelError> {
        let name = UserName::new(required_text("name", dto.name)?);
        let credential = CredentialHash::new(required_text("credential", dto.credential)?);

        let mut connection = self.database_connection().transact().await?;
        match dto.actor {
            Some(actor) => {
                self.authorize(&mut connection, &UserId::new(actor), Permission::ManageUsers)
                    .await?
            }
            None => {
                let existing = self.user_query().count_for_update(&mut connection).await?;
                if existing > 0 {
                    return Err(Report::new(KernelError::PermissionDenied)
                        .attach_printable("Only the first user may be registered without an actor"));
                }
            }
        }
        if self
            .user_query()
            .find_by_name(&mut connection, &name)
            .await?
            .is_some()
        {
            return Err(Report::new(KernelError::Validation)
                .attach(name)
                .attach_printable("User name already taken"));
        }

        let user = User::new(
            UserId::new(Uuid::new_v4()),
            name,
            credential,
            dto.role,
            CreatedAt::now(),
        );
        self.user_modifier().create(&mut connection, &user).await?;
        connection.commit().await?;
        tracing::info!(role = %user.role(), "Registered user");
        Ok(UserDto::from(user))
    }
}

impl<T> RegisterUserService for T where T: Authorize + DependOnUserQuery + DependOnUserModifier {}

#[async_trait::async_trait]
pub trait GetUserService: 'static + Sync + Send + DependOnUserQuery {
    async fn get_user(&self, dto: GetUserDto) -> error_stack::Result<UserDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = UserId::new(dto.id);
        let user = self
            .user_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| not_found(&id))?;
        Ok(UserDto::from(user))
    }

    async fn list_users(&self) -> error_stack::Result<Vec<UserDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let users = self.user_query().find_all(&mut connection).await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }
}

impl<T> GetUserService for T where T: DependOnUserQuery {}

#[async_trait::async_trait]
pub trait ChangeRoleService:
    'static + Sync + Send + Authorize + DependOnUserQuery + DependOnUserModifier
{
    #[tracing::instrument(skip_all)]
    async fn change_role(&self, dto: ChangeRoleDto) -> error_stack::Result<UserDto, KernelError> {
        let actor = UserId::new(dto.actor);
        let id = UserId::new(dto.id);
        let mut connection = self.database_connection().transact().await?;
        self.authorize(&mut connection, &actor, Permission::ManageUsers)
            .await?;
        let user = self
            .user_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| not_found(&id))?
            .with_role(dto.role);
        self.user_modifier().update(&mut connection, &user).await?;
        connection.commit().await?;
        tracing::info!(role = %user.role(), "Changed user role");
        Ok(UserDto::from(user))
    }
}

impl<T> ChangeRoleService for T where T: Authorize + DependOnUserQuery + DependOnUserModifier {}
