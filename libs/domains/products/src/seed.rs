//! Built-in sample catalog for development environments.

use uuid::Uuid;

use crate::models::Product;

struct SampleProduct {
    name: &'static str,
    description: &'static str,
    image: &'static str,
    price: i64,
    count_in_stock: i32,
}

const SAMPLES: &[SampleProduct] = &[
    SampleProduct {
        name: "Slim Fit Shirt",
        description: "Lightweight cotton shirt with a tailored cut",
        image: "/images/p1.jpg",
        price: 12000,
        count_in_stock: 10,
    },
    SampleProduct {
        name: "Slim Fit Pants",
        description: "Stretch chino pants for everyday wear",
        image: "/images/p2.jpg",
        price: 10000,
        count_in_stock: 20,
    },
    SampleProduct {
        name: "Classic Polo Shirt",
        description: "Pique polo shirt with a two-button placket",
        image: "/images/p3.jpg",
        price: 22000,
        count_in_stock: 0,
    },
    SampleProduct {
        name: "Crewneck Sweater",
        description: "Soft merino blend sweater",
        image: "/images/p4.jpg",
        price: 7800,
        count_in_stock: 15,
    },
    SampleProduct {
        name: "Relaxed Fit Jeans",
        description: "Mid-rise jeans with a straight leg",
        image: "/images/p5.jpg",
        price: 6500,
        count_in_stock: 5,
    },
    SampleProduct {
        name: "Training Jacket",
        description: "Water-resistant full-zip jacket",
        image: "/images/p6.jpg",
        price: 13900,
        count_in_stock: 12,
    },
];

/// Sample products inserted by the seed endpoint, all attached to the
/// given seller.
pub fn sample_products(seller: Uuid) -> Vec<Product> {
    SAMPLES
        .iter()
        .map(|sample| {
            Product::new(
                crate::models::CreateProduct {
                    name: sample.name.to_string(),
                    description: sample.description.to_string(),
                    image: sample.image.to_string(),
                    price: sample.price,
                    count_in_stock: sample.count_in_stock,
                },
                seller,
            )
        })
        .collect()
}
