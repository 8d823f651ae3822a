//! In-memory adapters and app wiring for endpoint tests.
//!
//! The Diesel adapters need a live PostgreSQL cluster; these tests swap
//! them for a `Memory` store implementing the same ports, so the full
//! HTTP surface (session handling, validation, services, serialisation)
//! runs end to end without I/O beyond a temp dir for images.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use actix_http::Request;
use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test as actix_test, web, App};
use async_trait::async_trait;

use backend::domain::ports::{
    FavoriteRepository, FavoriteRepositoryError, FixturePasswordHasher, LoginCredentials,
    LoginService, NewUser, PasswordHasher, RecipeRepository, RecipeRepositoryError,
    ReferenceDataRepository, ReferenceRepositoryError, ShoppingCartRepository,
    ShoppingCartRepositoryError, SubscriptionRepository, SubscriptionRepositoryError,
    UserCredentials, UserRepository, UserRepositoryError,
};
use backend::domain::recipe::{
    AuthorView, CookingTime, MeasuredIngredient, RecipeBrief, RecipeId, RecipeView,
    ValidatedRecipe,
};
use backend::domain::{
    AccountService, Error, FavoriteService, Ingredient, IngredientId, RecipeService,
    ShoppingCartService, SubscriptionService, Tag, TagColor, TagId, TagSlug, User, UserId,
};
use backend::inbound::http::state::HttpState;
use backend::outbound::images::Base64ImageStore;

/// A stored recipe with its resolved joins.
#[derive(Clone)]
struct StoredRecipe {
    id: i64,
    author_id: i64,
    name: String,
    text: String,
    cooking_time: i32,
    image_url: String,
    tags: Vec<Tag>,
    ingredients: Vec<MeasuredIngredient>,
}

#[derive(Default)]
struct Inner {
    users: Vec<(User, String)>,
    tags: Vec<Tag>,
    ingredients: Vec<Ingredient>,
    recipes: HashMap<i64, StoredRecipe>,
    favorites: Vec<(i64, i64)>,
    cart: Vec<(i64, i64)>,
    subscriptions: Vec<(i64, i64)>,
}

/// Shared in-memory store implementing every persistence port.
pub struct Memory {
    inner: Mutex<Inner>,
    next_recipe_id: AtomicI64,
    next_user_id: AtomicI64,
    hasher: FixturePasswordHasher,
}

fn tag(id: i64, slug: &str, color: &str) -> Tag {
    Tag::new(
        TagId::new(id),
        slug,
        TagSlug::new(slug).expect("valid slug"),
        TagColor::new(color).expect("valid colour"),
    )
    .expect("valid tag")
}

fn ingredient(id: i64, name: &str, unit: &str) -> Ingredient {
    Ingredient::new(IngredientId::new(id), name, unit).expect("valid ingredient")
}

impl Memory {
    /// Store seeded with the reference data the tests rely on.
    pub fn seeded() -> Arc<Self> {
        let inner = Inner {
            tags: vec![
                tag(1, "breakfast", "#49B64E"),
                tag(2, "dinner", "#E26C2D"),
            ],
            ingredients: vec![
                ingredient(1, "flour", "g"),
                ingredient(2, "milk", "ml"),
                ingredient(3, "oats", "g"),
            ],
            ..Inner::default()
        };
        Arc::new(Self {
            inner: Mutex::new(inner),
            next_recipe_id: AtomicI64::new(1),
            next_user_id: AtomicI64::new(1),
            hasher: FixturePasswordHasher,
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("store lock")
    }

    fn view_of(&self, stored: &StoredRecipe, viewer: Option<UserId>) -> RecipeView {
        let inner = self.lock();
        let author = inner
            .users
            .iter()
            .map(|(user, _)| user)
            .find(|user| user.id().value() == stored.author_id)
            .cloned()
            .expect("recipe author exists");
        let viewer_id = viewer.map(UserId::value);

        RecipeView {
            id: RecipeId::new(stored.id),
            name: stored.name.clone(),
            text: stored.text.clone(),
            cooking_time: CookingTime::new(stored.cooking_time).expect("stored time valid"),
            image_url: stored.image_url.clone(),
            author: AuthorView {
                is_subscribed: viewer_id.is_some_and(|viewer| {
                    inner
                        .subscriptions
                        .contains(&(viewer, stored.author_id))
                }),
                user: author,
            },
            tags: stored.tags.clone(),
            ingredients: stored.ingredients.clone(),
            is_favorited: viewer_id
                .is_some_and(|viewer| inner.favorites.contains(&(viewer, stored.id))),
            is_in_shopping_cart: viewer_id
                .is_some_and(|viewer| inner.cart.contains(&(viewer, stored.id))),
        }
    }
}

#[async_trait]
impl ReferenceDataRepository for Memory {
    async fn resolve_tags(&self, ids: &[TagId]) -> Result<Vec<Tag>, ReferenceRepositoryError> {
        let inner = self.lock();
        Ok(ids
            .iter()
            .filter_map(|id| inner.tags.iter().find(|tag| tag.id() == *id).cloned())
            .collect())
    }

    async fn resolve_ingredients(
        &self,
        ids: &[IngredientId],
    ) -> Result<Vec<Ingredient>, ReferenceRepositoryError> {
        let inner = self.lock();
        Ok(ids
            .iter()
            .filter_map(|id| {
                inner
                    .ingredients
                    .iter()
                    .find(|ingredient| ingredient.id() == *id)
                    .cloned()
            })
            .collect())
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, ReferenceRepositoryError> {
        Ok(self.lock().tags.clone())
    }

    async fn find_tag(&self, id: TagId) -> Result<Option<Tag>, ReferenceRepositoryError> {
        Ok(self.lock().tags.iter().find(|tag| tag.id() == id).cloned())
    }

    async fn list_ingredients<'a>(
        &self,
        name_prefix: Option<&'a str>,
    ) -> Result<Vec<Ingredient>, ReferenceRepositoryError> {
        let inner = self.lock();
        Ok(inner
            .ingredients
            .iter()
            .filter(|ingredient| {
                name_prefix.is_none_or(|prefix| {
                    ingredient
                        .name()
                        .to_lowercase()
                        .starts_with(&prefix.to_lowercase())
                })
            })
            .cloned()
            .collect())
    }

    async fn find_ingredient(
        &self,
        id: IngredientId,
    ) -> Result<Option<Ingredient>, ReferenceRepositoryError> {
        Ok(self
            .lock()
            .ingredients
            .iter()
            .find(|ingredient| ingredient.id() == id)
            .cloned())
    }
}

#[async_trait]
impl RecipeRepository for Memory {
    async fn create(
        &self,
        author: UserId,
        recipe: &ValidatedRecipe,
        image_url: &str,
    ) -> Result<RecipeId, RecipeRepositoryError> {
        let id = self.next_recipe_id.fetch_add(1, Ordering::Relaxed);
        self.lock().recipes.insert(
            id,
            StoredRecipe {
                id,
                author_id: author.value(),
                name: recipe.name().to_owned(),
                text: recipe.text().to_owned(),
                cooking_time: recipe.cooking_time().minutes(),
                image_url: image_url.to_owned(),
                tags: recipe.tags().to_vec(),
                ingredients: recipe.ingredients().to_vec(),
            },
        );
        Ok(RecipeId::new(id))
    }

    async fn replace(
        &self,
        recipe_id: RecipeId,
        recipe: &ValidatedRecipe,
        image_url: &str,
    ) -> Result<(), RecipeRepositoryError> {
        let mut inner = self.lock();
        let stored = inner
            .recipes
            .get_mut(&recipe_id.value())
            .ok_or_else(|| RecipeRepositoryError::write_failed("recipe row missing"))?;
        stored.name = recipe.name().to_owned();
        stored.text = recipe.text().to_owned();
        stored.cooking_time = recipe.cooking_time().minutes();
        stored.image_url = image_url.to_owned();
        stored.tags = recipe.tags().to_vec();
        stored.ingredients = recipe.ingredients().to_vec();
        Ok(())
    }

    async fn delete(&self, recipe_id: RecipeId) -> Result<bool, RecipeRepositoryError> {
        let mut inner = self.lock();
        let removed = inner.recipes.remove(&recipe_id.value()).is_some();
        inner.favorites.retain(|(_, recipe)| *recipe != recipe_id.value());
        inner.cart.retain(|(_, recipe)| *recipe != recipe_id.value());
        Ok(removed)
    }

    async fn find_author(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Option<UserId>, RecipeRepositoryError> {
        Ok(self
            .lock()
            .recipes
            .get(&recipe_id.value())
            .map(|stored| UserId::new(stored.author_id)))
    }

    async fn find_brief(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Option<RecipeBrief>, RecipeRepositoryError> {
        Ok(self.lock().recipes.get(&recipe_id.value()).map(|stored| {
            RecipeBrief {
                id: RecipeId::new(stored.id),
                name: stored.name.clone(),
                image_url: stored.image_url.clone(),
                cooking_time: CookingTime::new(stored.cooking_time).expect("stored time valid"),
            }
        }))
    }

    async fn find_view(
        &self,
        recipe_id: RecipeId,
        viewer: Option<UserId>,
    ) -> Result<Option<RecipeView>, RecipeRepositoryError> {
        let stored = self.lock().recipes.get(&recipe_id.value()).cloned();
        Ok(stored.map(|stored| self.view_of(&stored, viewer)))
    }

    async fn list_views(
        &self,
        viewer: Option<UserId>,
    ) -> Result<Vec<RecipeView>, RecipeRepositoryError> {
        let mut stored: Vec<StoredRecipe> = self.lock().recipes.values().cloned().collect();
        stored.sort_by_key(|recipe| std::cmp::Reverse(recipe.id));
        Ok(stored
            .iter()
            .map(|recipe| self.view_of(recipe, viewer))
            .collect())
    }

    async fn list_briefs_by_author(
        &self,
        author: UserId,
    ) -> Result<Vec<RecipeBrief>, RecipeRepositoryError> {
        let inner = self.lock();
        let mut stored: Vec<&StoredRecipe> = inner
            .recipes
            .values()
            .filter(|recipe| recipe.author_id == author.value())
            .collect();
        stored.sort_by_key(|recipe| std::cmp::Reverse(recipe.id));
        Ok(stored
            .iter()
            .map(|recipe| RecipeBrief {
                id: RecipeId::new(recipe.id),
                name: recipe.name.clone(),
                image_url: recipe.image_url.clone(),
                cooking_time: CookingTime::new(recipe.cooking_time).expect("stored time valid"),
            })
            .collect())
    }
}

#[async_trait]
impl FavoriteRepository for Memory {
    async fn insert(&self, user: UserId, recipe: RecipeId) -> Result<(), FavoriteRepositoryError> {
        let mut inner = self.lock();
        let pair = (user.value(), recipe.value());
        if inner.favorites.contains(&pair) {
            return Err(FavoriteRepositoryError::duplicate("favorites_user_recipe_key"));
        }
        inner.favorites.push(pair);
        Ok(())
    }

    async fn delete(
        &self,
        user: UserId,
        recipe: RecipeId,
    ) -> Result<bool, FavoriteRepositoryError> {
        let mut inner = self.lock();
        let pair = (user.value(), recipe.value());
        let before = inner.favorites.len();
        inner.favorites.retain(|stored| *stored != pair);
        Ok(inner.favorites.len() < before)
    }
}

#[async_trait]
impl ShoppingCartRepository for Memory {
    async fn insert(
        &self,
        user: UserId,
        recipe: RecipeId,
    ) -> Result<(), ShoppingCartRepositoryError> {
        let mut inner = self.lock();
        let pair = (user.value(), recipe.value());
        if inner.cart.contains(&pair) {
            return Err(ShoppingCartRepositoryError::duplicate(
                "shopping_cart_user_recipe_key",
            ));
        }
        inner.cart.push(pair);
        Ok(())
    }

    async fn delete(
        &self,
        user: UserId,
        recipe: RecipeId,
    ) -> Result<bool, ShoppingCartRepositoryError> {
        let mut inner = self.lock();
        let pair = (user.value(), recipe.value());
        let before = inner.cart.len();
        inner.cart.retain(|stored| *stored != pair);
        Ok(inner.cart.len() < before)
    }

    async fn load_cart_ingredients(
        &self,
        user: UserId,
    ) -> Result<Vec<MeasuredIngredient>, ShoppingCartRepositoryError> {
        let inner = self.lock();
        let mut links = Vec::new();
        for (cart_user, recipe_id) in &inner.cart {
            if *cart_user != user.value() {
                continue;
            }
            if let Some(stored) = inner.recipes.get(recipe_id) {
                links.extend(stored.ingredients.iter().cloned());
            }
        }
        Ok(links)
    }
}

#[async_trait]
impl SubscriptionRepository for Memory {
    async fn insert(
        &self,
        user: UserId,
        author: UserId,
    ) -> Result<(), SubscriptionRepositoryError> {
        let mut inner = self.lock();
        let pair = (user.value(), author.value());
        if inner.subscriptions.contains(&pair) {
            return Err(SubscriptionRepositoryError::duplicate(
                "subscriptions_user_author_key",
            ));
        }
        inner.subscriptions.push(pair);
        Ok(())
    }

    async fn delete(
        &self,
        user: UserId,
        author: UserId,
    ) -> Result<bool, SubscriptionRepositoryError> {
        let mut inner = self.lock();
        let pair = (user.value(), author.value());
        let before = inner.subscriptions.len();
        inner.subscriptions.retain(|stored| *stored != pair);
        Ok(inner.subscriptions.len() < before)
    }

    async fn exists(
        &self,
        user: UserId,
        author: UserId,
    ) -> Result<bool, SubscriptionRepositoryError> {
        Ok(self
            .lock()
            .subscriptions
            .contains(&(user.value(), author.value())))
    }

    async fn list_authors(&self, user: UserId) -> Result<Vec<User>, SubscriptionRepositoryError> {
        let inner = self.lock();
        let mut authors = Vec::new();
        for (subscriber, author_id) in inner.subscriptions.iter().rev() {
            if *subscriber != user.value() {
                continue;
            }
            if let Some((author, _)) = inner
                .users
                .iter()
                .find(|(user, _)| user.id().value() == *author_id)
            {
                authors.push(author.clone());
            }
        }
        Ok(authors)
    }
}

#[async_trait]
impl UserRepository for Memory {
    async fn insert(&self, new_user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut inner = self.lock();
        if inner
            .users
            .iter()
            .any(|(user, _)| user.email() == &new_user.email)
        {
            return Err(UserRepositoryError::duplicate_email("users_email_key"));
        }
        if inner
            .users
            .iter()
            .any(|(user, _)| user.username() == &new_user.username)
        {
            return Err(UserRepositoryError::duplicate_username("users_username_key"));
        }

        let id = self.next_user_id.fetch_add(1, Ordering::Relaxed);
        let user = User::new(
            UserId::new(id),
            new_user.email.clone(),
            new_user.username.clone(),
            new_user.first_name.clone(),
            new_user.last_name.clone(),
        )
        .map_err(|err| UserRepositoryError::query(err.to_string()))?;
        inner
            .users
            .push((user.clone(), new_user.password_hash.clone()));
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self
            .lock()
            .users
            .iter()
            .map(|(user, _)| user)
            .find(|user| user.id() == id)
            .cloned())
    }

    async fn find_credentials_by_email(
        &self,
        email: &backend::domain::EmailAddress,
    ) -> Result<Option<UserCredentials>, UserRepositoryError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|(user, _)| user.email() == email)
            .map(|(user, hash)| UserCredentials {
                user: user.clone(),
                password_hash: hash.clone(),
            }))
    }
}

#[async_trait]
impl LoginService for Memory {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let stored = self
            .find_credentials_by_email(credentials.email())
            .await
            .map_err(|err| Error::internal(err.to_string()))?;
        match stored {
            Some(stored) if self.hasher.verify(credentials.password(), &stored.password_hash) => {
                Ok(stored.user)
            }
            _ => Err(Error::unauthorized("invalid credentials")),
        }
    }
}

/// Everything an endpoint test needs: state over the in-memory store plus
/// the temp dir backing the real image codec.
pub struct TestBackend {
    pub memory: Arc<Memory>,
    pub state: HttpState,
    _media: tempfile::TempDir,
}

impl TestBackend {
    pub fn new() -> Self {
        let memory = Memory::seeded();
        let media = tempfile::tempdir().expect("temp media root");
        let images = Arc::new(Base64ImageStore::open(media.path()).expect("media root opens"));

        let recipe_service = Arc::new(RecipeService::new(
            memory.clone(),
            memory.clone(),
            images,
        ));
        let state = HttpState {
            login: memory.clone(),
            accounts: Arc::new(AccountService::new(
                memory.clone(),
                memory.clone(),
                Arc::new(FixturePasswordHasher),
            )),
            recipe_commands: recipe_service.clone(),
            recipe_queries: recipe_service,
            favorites: Arc::new(FavoriteService::new(memory.clone(), memory.clone())),
            shopping_cart: Arc::new(ShoppingCartService::new(memory.clone(), memory.clone())),
            subscriptions: Arc::new(SubscriptionService::new(
                memory.clone(),
                memory.clone(),
                memory.clone(),
            )),
            reference: memory.clone(),
        };

        Self {
            memory,
            state,
            _media: media,
        }
    }

    /// Full `/api/v1` app over the in-memory state.
    pub fn app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
            .cookie_name("session".into())
            .cookie_secure(false)
            .build();

        App::new()
            .app_data(web::Data::new(self.state.clone()))
            .service(
                web::scope("/api/v1")
                    .wrap(session)
                    .configure(backend::inbound::http::configure_api),
            )
    }
}

/// Register an account and log in, returning the session cookie.
pub async fn register_and_login<S, B>(app: &S, email: &str, username: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(serde_json::json!({
                "email": email,
                "username": username,
                "first_name": "Ada",
                "last_name": "Lovelace",
                "password": "password123",
            }))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "registration should succeed");

    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(serde_json::json!({
                "email": email,
                "password": "password123",
            }))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "login should succeed");

    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// A well-formed recipe payload over the seeded reference data.
pub fn recipe_payload(
    name: &str,
    tags: &[i64],
    ingredients: &[(i64, i32)],
) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "text": "Combine and cook.",
        "cooking_time": 10,
        "image": "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==",
        "tags": tags,
        "ingredients": ingredients
            .iter()
            .map(|(id, amount)| serde_json::json!({ "id": id, "amount": amount }))
            .collect::<Vec<_>>(),
    })
}
