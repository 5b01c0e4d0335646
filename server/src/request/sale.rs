use crate::controller::Intake;
use application::transfer::GetSaleDto;
use uuid::Uuid;

#[derive(Debug)]
pub struct GetSaleRequest {
    id: Uuid,
}

impl GetSaleRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct SaleTransformer;

impl Intake<GetSaleRequest> for SaleTransformer {
    type To = GetSaleDto;
    fn emit(&self, input: GetSaleRequest) -> Self::To {
        GetSaleDto { id: input.id }
    }
}
