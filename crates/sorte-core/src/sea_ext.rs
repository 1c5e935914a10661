use sea_orm::{
    EntityTrait, Order, QueryOrder, QuerySelect, Select,
    sea_query::{Func, SimpleExpr},
};

/// Random row selection for Postgres (`ORDER BY RANDOM()`).
pub trait OrderByRandom: Sized {
    fn order_by_random(self) -> Self;

    /// Up to `n` rows in random order.
    fn sample(self, n: u64) -> Self;
}

impl<E> OrderByRandom for Select<E>
where
    E: EntityTrait,
{
    fn order_by_random(mut self) -> Self {
        QueryOrder::query(&mut self)
            .order_by_expr(SimpleExpr::FunctionCall(Func::random()), Order::Desc);
        self
    }

    fn sample(self, n: u64) -> Self {
        self.order_by_random().limit(n)
    }
}
