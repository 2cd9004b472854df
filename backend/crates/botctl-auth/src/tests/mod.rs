mod token_validator;
