//! The DummyJSON e-commerce contract suite.
//!
//! Thirteen cases over products, users and carts, run in order. The product
//! fetched by the second case is captured as `product_id` and used by the
//! update and delete cases.

use probe_application::{BuildError, DataFactory, Suite};
use probe_domain::request::RequestTemplate;
use probe_domain::{Bindings, Case, ExpectationSet, JsonType, SchemaDescriptor};
use serde_json::{Value, json};

/// Product fetched, updated and deleted by the product cases.
const PRODUCT_ID: u64 = 1;
/// User fetched by the single-user case and owning the new cart.
const USER_ID: u64 = 1;

fn number() -> SchemaDescriptor {
    SchemaDescriptor::of_type(JsonType::Number)
}

fn string() -> SchemaDescriptor {
    SchemaDescriptor::of_type(JsonType::String)
}

fn array() -> SchemaDescriptor {
    SchemaDescriptor::of_type(JsonType::Array)
}

fn product_id(bindings: &Bindings) -> Result<Value, BuildError> {
    bindings
        .get("product_id")
        .cloned()
        .ok_or_else(|| BuildError::UndefinedVariable("product_id".to_string()))
}

/// Builds the full suite.
pub fn suite() -> Suite {
    Suite::new("DummyJSON API - E-commerce")
        .case(list_products())
        .case(get_product())
        .case(products_by_category())
        .case(search_products())
        .plan("Products: create product", create_product)
        .plan("Products: replace product", replace_product)
        .plan("Products: patch product price", patch_product)
        .plan("Products: delete product", delete_product)
        .case(list_users())
        .case(get_user())
        .plan("Users: create user", create_user)
        .case(list_carts())
        .case(create_cart())
}

fn list_products() -> Case {
    let product = SchemaDescriptor::object()
        .property("id", number())
        .property("title", string())
        .property("description", string())
        .property("price", number())
        .property("brand", string())
        .property("category", string())
        .require(["id", "title", "description", "price"]);

    Case::new(
        "Products: list products with pagination",
        RequestTemplate::get("/products").query("limit", 10).query("skip", 0),
    )
    .expect(
        ExpectationSet::new()
            .status(200)
            .schema(
                SchemaDescriptor::object()
                    .property("products", SchemaDescriptor::array_of(product))
                    .property("total", number())
                    .property("skip", number())
                    .property("limit", number())
                    .require(["products", "total", "skip", "limit"]),
            )
            .json_match(json!({"limit": 10, "skip": 0})),
    )
}

fn get_product() -> Case {
    Case::new(
        "Products: get product by id",
        RequestTemplate::get(format!("/products/{PRODUCT_ID}")),
    )
    .expect(
        ExpectationSet::new()
            .status(200)
            .schema(
                SchemaDescriptor::object()
                    .property("id", number())
                    .property("title", string())
                    .property("description", string())
                    .property("price", number())
                    .property("discountPercentage", number())
                    .property("rating", number())
                    .property("stock", number())
                    .property("brand", string())
                    .property("category", string())
                    .require(["id", "title", "description", "price", "stock"]),
            )
            .json_match(json!({"id": PRODUCT_ID})),
    )
    .capture("product_id", "$.id")
}

fn products_by_category() -> Case {
    let product = SchemaDescriptor::object()
        .property("id", number())
        .property("title", string())
        .property("category", string());

    Case::new(
        "Products: list products in a category",
        RequestTemplate::get("/products/category/smartphones"),
    )
    .expect(
        ExpectationSet::new().status(200).schema(
            SchemaDescriptor::object()
                .property("products", SchemaDescriptor::array_of(product))
                .require(["products"]),
        ),
    )
}

fn search_products() -> Case {
    Case::new(
        "Products: search products by name",
        RequestTemplate::get("/products/search").query("q", "phone"),
    )
    .expect(
        ExpectationSet::new().status(200).schema(
            SchemaDescriptor::object()
                .property("products", array())
                .property("total", number())
                .require(["products", "total"]),
        ),
    )
}

fn create_product(_: &Bindings, factory: &mut dyn DataFactory) -> Result<Case, BuildError> {
    let product = json!({
        "title": factory.product_name(),
        "description": factory.product_description(),
        "price": factory.price(1, 1000),
        "discountPercentage": factory.float(0.0, 20.0, 2),
        "rating": factory.float(0.0, 5.0, 2),
        "stock": factory.int(1, 100),
        "brand": factory.company_name(),
        "category": factory.department(),
    });

    Ok(Case::new(
        "Products: create product",
        RequestTemplate::post("/products/add").json(&product)?,
    )
    .expect(
        ExpectationSet::new()
            .status(201)
            .schema(
                SchemaDescriptor::object()
                    .property("id", number())
                    .property("title", string())
                    .property("description", string())
                    .property("price", number())
                    .require(["id", "title"]),
            )
            .json_like(json!({
                "title": product["title"],
                "description": product["description"],
            })),
    ))
}

fn replace_product(
    bindings: &Bindings,
    factory: &mut dyn DataFactory,
) -> Result<Case, BuildError> {
    let id = product_id(bindings)?;
    let product = json!({
        "title": factory.product_name(),
        "description": factory.product_description(),
        "price": factory.price(1, 1000),
        "rating": factory.float(0.0, 5.0, 2),
        "stock": factory.int(1, 50),
    });

    Ok(Case::new(
        "Products: replace product",
        RequestTemplate::put("/products/{product_id}").json(&product)?,
    )
    .expect(
        ExpectationSet::new()
            .status(200)
            .schema(
                SchemaDescriptor::object()
                    .property("id", number())
                    .property("title", string())
                    .property("description", string())
                    .property("price", number()),
            )
            .json_match(json!({"title": product["title"], "id": id})),
    ))
}

fn patch_product(
    bindings: &Bindings,
    factory: &mut dyn DataFactory,
) -> Result<Case, BuildError> {
    let id = product_id(bindings)?;
    let price = factory.price(500, 1000);

    Ok(Case::new(
        "Products: patch product price",
        RequestTemplate::patch("/products/{product_id}").body(json!({"price": price})),
    )
    .expect(
        ExpectationSet::new()
            .status(200)
            .schema(
                SchemaDescriptor::object()
                    .property("id", number())
                    .property("price", number()),
            )
            .json_match(json!({"id": id}))
            .json_like(json!({"price": price})),
    ))
}

fn delete_product(
    bindings: &Bindings,
    _: &mut dyn DataFactory,
) -> Result<Case, BuildError> {
    let id = product_id(bindings)?;

    Ok(Case::new(
        "Products: delete product",
        RequestTemplate::delete("/products/{product_id}"),
    )
    .expect(
        ExpectationSet::new()
            .status(200)
            .schema(
                SchemaDescriptor::object()
                    .property("id", number())
                    .property("isDeleted", SchemaDescriptor::of_type(JsonType::Boolean))
                    .require(["id", "isDeleted"]),
            )
            .json_match(json!({"id": id, "isDeleted": true})),
    ))
}

fn list_users() -> Case {
    let user = SchemaDescriptor::object()
        .property("id", number())
        .property("firstName", string())
        .property("lastName", string())
        .property("email", string())
        .property("phone", string())
        .require(["id", "firstName", "lastName", "email"]);

    Case::new(
        "Users: list users",
        RequestTemplate::get("/users").query("limit", 5),
    )
    .expect(
        ExpectationSet::new().status(200).schema(
            SchemaDescriptor::object()
                .property("users", SchemaDescriptor::array_of(user))
                .property("total", number())
                .require(["users", "total"]),
        ),
    )
}

fn get_user() -> Case {
    Case::new(
        "Users: get user by id",
        RequestTemplate::get(format!("/users/{USER_ID}")),
    )
    .expect(
        ExpectationSet::new()
            .status(200)
            .schema(
                SchemaDescriptor::object()
                    .property("id", number())
                    .property("firstName", string())
                    .property("lastName", string())
                    .property("email", string())
                    .require(["id", "firstName", "lastName", "email"]),
            )
            .json_match(json!({"id": USER_ID})),
    )
}

fn create_user(_: &Bindings, factory: &mut dyn DataFactory) -> Result<Case, BuildError> {
    let user = json!({
        "firstName": factory.first_name(),
        "lastName": factory.last_name(),
        "email": factory.email(),
        "phone": factory.phone_number(),
        "age": factory.int(18, 65),
    });

    Ok(Case::new(
        "Users: create user",
        RequestTemplate::post("/users/add").json(&user)?,
    )
    .expect(
        ExpectationSet::new()
            .status(201)
            .schema(
                SchemaDescriptor::object()
                    .property("id", number())
                    .property("firstName", string())
                    .property("lastName", string())
                    .property("email", string())
                    .require(["id", "firstName", "lastName"]),
            )
            .json_like(json!({
                "firstName": user["firstName"],
                "lastName": user["lastName"],
            })),
    ))
}

fn list_carts() -> Case {
    let cart = SchemaDescriptor::object()
        .property("id", number())
        .property("products", array())
        .property("total", number())
        .property("userId", number())
        .require(["id", "products", "total", "userId"]);

    Case::new(
        "Carts: list carts",
        RequestTemplate::get("/carts").query("limit", 3),
    )
    .expect(
        ExpectationSet::new().status(200).schema(
            SchemaDescriptor::object()
                .property("carts", SchemaDescriptor::array_of(cart))
                .property("total", number())
                .require(["carts", "total"]),
        ),
    )
}

fn create_cart() -> Case {
    Case::new(
        "Carts: create cart",
        RequestTemplate::post("/carts/add").body(json!({
            "userId": USER_ID,
            "products": [
                {"id": 1, "quantity": 2},
                {"id": 5, "quantity": 1},
            ],
        })),
    )
    .expect(
        ExpectationSet::new()
            .status(201)
            .schema(
                SchemaDescriptor::object()
                    .property("id", number())
                    .property("products", array())
                    .property("userId", number())
                    .require(["id", "products", "userId"]),
            )
            .json_match(json!({"userId": USER_ID})),
    )
}
