//! Favorite toggle domain service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{
    FavoriteCommand, FavoriteRepository, FavoriteRepositoryError, RecipeRepository,
};
use crate::domain::recipe::{RecipeBrief, RecipeId};
use crate::domain::recipe_service::map_recipe_repository_error;
use crate::domain::user::UserId;
use crate::domain::Error;

fn map_favorite_repository_error(error: FavoriteRepositoryError) -> Error {
    match error {
        FavoriteRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("favorite repository unavailable: {message}"))
        }
        FavoriteRepositoryError::Query { message } => {
            Error::internal(format!("favorite repository error: {message}"))
        }
        FavoriteRepositoryError::Duplicate { .. } => {
            Error::conflict("recipe is already in favorites")
                .with_details(json!({ "code": "already_exists" }))
        }
    }
}

/// Favorite service implementing the toggle driving port.
#[derive(Clone)]
pub struct FavoriteService<F, R> {
    favorites: Arc<F>,
    recipes: Arc<R>,
}

impl<F, R> FavoriteService<F, R>
where
    F: FavoriteRepository,
    R: RecipeRepository,
{
    /// Create a new service over the favorite and recipe ports.
    pub fn new(favorites: Arc<F>, recipes: Arc<R>) -> Self {
        Self { favorites, recipes }
    }

    async fn require_brief(&self, recipe: RecipeId) -> Result<RecipeBrief, Error> {
        self.recipes
            .find_brief(recipe)
            .await
            .map_err(map_recipe_repository_error)?
            .ok_or_else(|| Error::not_found(format!("recipe {recipe} not found")))
    }
}

#[async_trait]
impl<F, R> FavoriteCommand for FavoriteService<F, R>
where
    F: FavoriteRepository,
    R: RecipeRepository,
{
    async fn add_favorite(&self, user: UserId, recipe: RecipeId) -> Result<RecipeBrief, Error> {
        let brief = self.require_brief(recipe).await?;
        self.favorites
            .insert(user, recipe)
            .await
            .map_err(map_favorite_repository_error)?;
        Ok(brief)
    }

    async fn remove_favorite(&self, user: UserId, recipe: RecipeId) -> Result<(), Error> {
        let removed = self
            .favorites
            .delete(user, recipe)
            .await
            .map_err(map_favorite_repository_error)?;
        if !removed {
            return Err(Error::not_found("recipe is not in favorites"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the favorite toggle contract.
    use super::*;
    use crate::domain::ports::{MockFavoriteRepository, MockRecipeRepository};
    use crate::domain::recipe::CookingTime;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn brief(id: i64) -> RecipeBrief {
        RecipeBrief {
            id: RecipeId::new(id),
            name: "Porridge".to_owned(),
            image_url: "/media/recipes/abc.png".to_owned(),
            cooking_time: CookingTime::new(10).expect("valid time"),
        }
    }

    fn service(
        favorites: MockFavoriteRepository,
        recipes: MockRecipeRepository,
    ) -> FavoriteService<MockFavoriteRepository, MockRecipeRepository> {
        FavoriteService::new(Arc::new(favorites), Arc::new(recipes))
    }

    #[rstest]
    #[tokio::test]
    async fn add_returns_brief_recipe() {
        let mut recipes = MockRecipeRepository::new();
        recipes
            .expect_find_brief()
            .returning(|_| Ok(Some(brief(10))));
        let mut favorites = MockFavoriteRepository::new();
        favorites.expect_insert().times(1).returning(|_, _| Ok(()));

        let added = service(favorites, recipes)
            .add_favorite(UserId::new(1), RecipeId::new(10))
            .await
            .expect("first add succeeds");

        assert_eq!(added.id, RecipeId::new(10));
    }

    #[rstest]
    #[tokio::test]
    async fn add_rejects_existing_pair_with_conflict() {
        let mut recipes = MockRecipeRepository::new();
        recipes
            .expect_find_brief()
            .returning(|_| Ok(Some(brief(10))));
        let mut favorites = MockFavoriteRepository::new();
        favorites
            .expect_insert()
            .returning(|_, _| Err(FavoriteRepositoryError::duplicate("unique_favorite")));

        let err = service(favorites, recipes)
            .add_favorite(UserId::new(1), RecipeId::new(10))
            .await
            .expect_err("second add must fail");

        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn add_rejects_unknown_recipe() {
        let mut recipes = MockRecipeRepository::new();
        recipes.expect_find_brief().returning(|_| Ok(None));

        let err = service(MockFavoriteRepository::new(), recipes)
            .add_favorite(UserId::new(1), RecipeId::new(404))
            .await
            .expect_err("unknown recipe must fail");

        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn remove_of_absent_pair_is_not_found() {
        let mut favorites = MockFavoriteRepository::new();
        favorites.expect_delete().returning(|_, _| Ok(false));

        let err = service(favorites, MockRecipeRepository::new())
            .remove_favorite(UserId::new(1), RecipeId::new(10))
            .await
            .expect_err("removing a never-added favorite must fail");

        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
